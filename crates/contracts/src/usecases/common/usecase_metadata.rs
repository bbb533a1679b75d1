/// Identity of a use case as shown to the user and in logs
pub trait UseCaseMetadata {
    /// Sequence index, e.g. "u501"
    fn usecase_index() -> &'static str;

    fn usecase_name() -> &'static str;

    /// Title shown in modal headers and menus
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_import_transactions_csv"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
