use std::fmt;

use crate::config::DisplayConfig;
use crate::row::Row;
use crate::schema::Schema;

/// Column aligned plain text rendering of a schema and its rows.
///
/// Every column is left aligned and padded to its widest value. Trailing
/// whitespace is trimmed from each line.
#[derive(Debug)]
pub struct PrettyTable<'a> {
    header: &'a [String],
    rows: Vec<&'a Row>,
    /// Number of rows omitted because of `max_rows`.
    omitted: usize,
    widths: Vec<usize>,
    separator: &'a str,
}

impl<'a> PrettyTable<'a> {
    pub fn new<I>(schema: &'a Schema, rows: I, config: &'a DisplayConfig) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut iter = rows.into_iter();
        let rows: Vec<_> = match config.max_rows {
            Some(max) => iter.by_ref().take(max).collect(),
            None => iter.by_ref().collect(),
        };
        let omitted = iter.count();

        let header = schema.columns();
        let mut widths: Vec<_> = header.iter().map(|c| c.chars().count()).collect();
        for row in &rows {
            for (width, value) in widths.iter_mut().zip(row.values()) {
                *width = (*width).max(value.chars().count());
            }
        }

        PrettyTable {
            header,
            rows,
            omitted,
            widths,
            separator: &config.column_separator,
        }
    }

    fn write_line<'b, I>(&self, f: &mut fmt::Formatter<'_>, values: I) -> fmt::Result
    where
        I: IntoIterator<Item = &'b String>,
    {
        let mut line = String::new();
        for (idx, (value, width)) in values.into_iter().zip(&self.widths).enumerate() {
            if idx > 0 {
                line.push_str(self.separator);
            }
            line.push_str(value);
            let pad = width.saturating_sub(value.chars().count());
            line.extend(std::iter::repeat_n(' ', pad));
        }
        f.write_str(line.trim_end())
    }
}

impl fmt::Display for PrettyTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_line(f, self.header)?;
        for row in &self.rows {
            writeln!(f)?;
            self.write_line(f, row.values())?;
        }
        if self.omitted > 0 {
            writeln!(f)?;
            let noun = if self.omitted == 1 { "row" } else { "rows" };
            write!(f, "... {} more {noun}", self.omitted)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&[&str]]) -> Vec<Row> {
        values.iter().map(|r| r.iter().copied().collect()).collect()
    }

    #[test]
    fn aligned() {
        let schema = Schema::try_new(["SId", "SName", "GradYear"]).unwrap();
        let rows = rows(&[&["1", "joe", "2021"], &["10", "alexander", "2020"]]);
        let config = DisplayConfig::default();

        let table = PrettyTable::new(&schema, &rows, &config);
        insta::assert_snapshot!(table, @r"
        SId    SName        GradYear
        1      joe          2021
        10     alexander    2020
        ");
    }

    #[test]
    fn truncated() {
        let schema = Schema::try_new(["a"]).unwrap();
        let rows = rows(&[&["1"], &["2"], &["3"]]);
        let config = DisplayConfig::default().with_max_rows(Some(1));

        let table = PrettyTable::new(&schema, &rows, &config);
        insta::assert_snapshot!(table, @r"
        a
        1
        ... 2 more rows
        ");
    }

    #[test]
    fn custom_separator() {
        let schema = Schema::try_new(["a", "b"]).unwrap();
        let rows = rows(&[&["x", "y"]]);
        let config = DisplayConfig {
            max_rows: None,
            column_separator: " | ".to_string(),
        };

        let table = PrettyTable::new(&schema, &rows, &config);
        assert_eq!("a | b\nx | y", table.to_string());
    }

    #[test]
    fn empty() {
        let schema = Schema::try_new(["SId", "SName"]).unwrap();
        let config = DisplayConfig::default();
        let table = PrettyTable::new(&schema, std::iter::empty(), &config);
        assert_eq!("SId    SName", table.to_string());
    }
}
