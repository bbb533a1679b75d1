pub mod events;
pub mod request;
pub mod result;

pub use events::{ImportEvent, ImportEventKind};
pub use request::{ImportRequest, DEFAULT_IMPORT_PATH};
pub use result::ImportResult;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportTransactionsCsv;

impl UseCaseMetadata for ImportTransactionsCsv {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_transactions_csv"
    }

    fn display_name() -> &'static str {
        "Import transactions"
    }

    fn description() -> &'static str {
        "Upload a CSV file of transactions and follow the server-side import as it streams progress"
    }
}
