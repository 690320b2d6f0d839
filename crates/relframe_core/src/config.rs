/// Options controlling how relations are rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Maximum number of rows to render. Remaining rows are summarized on a
    /// trailing line.
    pub max_rows: Option<usize>,
    /// Separator placed between columns.
    pub column_separator: String,
}

impl DisplayConfig {
    pub const DEFAULT_SEPARATOR: &'static str = "    ";

    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            max_rows: None,
            column_separator: Self::DEFAULT_SEPARATOR.to_string(),
        }
    }
}
