use serde::{Deserialize, Serialize};

/// Итог импорта, приходит один раз в терминальном событии
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    #[serde(default)]
    pub imported_count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ImportResult {
    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// One-line summary for the progress log
    pub fn summary(&self) -> String {
        let mut text = if self.success {
            format!("Imported {} transaction(s)", self.imported_count)
        } else {
            format!("Import failed after {} transaction(s)", self.imported_count)
        };
        if !self.errors.is_empty() {
            text.push_str(&format!(", {} error(s)", self.errors.len()));
        }
        if !self.warnings.is_empty() {
            text.push_str(&format!(", {} warning(s)", self.warnings.len()));
        }
        text
    }
}
