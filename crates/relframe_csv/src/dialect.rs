use std::fmt;

use relframe_error::{RelError, Result};

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DialectOptions {
    /// Delimiter character.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for DialectOptions {
    fn default() -> Self {
        DialectOptions {
            delimiter: b',',
            quote: b'|',
        }
    }
}

impl fmt::Debug for DialectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectOptions")
            .field("delimiter", &(self.delimiter as char))
            .field("quote", &(self.quote as char))
            .finish()
    }
}

impl DialectOptions {
    /// Dialect using the given delimiter and the default quote.
    ///
    /// The delimiter must be a single ASCII character. `\t` is accepted as a
    /// spelling of tab.
    pub fn with_delimiter(delimiter: &str) -> Result<Self> {
        let delimiter = match delimiter {
            "\\t" => b'\t',
            s if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
            s => {
                return Err(RelError::invalid_argument(format!(
                    "Delimiter must be a single ASCII character, got '{s}'"
                )));
            }
        };

        Ok(DialectOptions {
            delimiter,
            ..Default::default()
        })
    }

    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(true);
        builder
    }
}

/// Options for reading a relation from delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    pub dialect: DialectOptions,
    /// Trim surrounding whitespace from headers and values.
    pub trim: bool,
}
