use std::io::Write;

use relframe_core::Tabular;
use relframe_error::{Result, ResultExt};

use crate::dialect::DialectOptions;

/// Write a header record followed by every row of `source`.
///
/// Rows are written in the source's iteration order.
pub fn write_relation<W, T>(writer: W, source: &T, dialect: &DialectOptions) -> Result<()>
where
    W: Write,
    T: Tabular,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .from_writer(writer);

    csv_writer
        .write_record(source.columns())
        .context("failed to write header")?;
    for row in source.iter_rows() {
        csv_writer
            .write_record(row.values())
            .context("failed to write record")?;
    }
    csv_writer.flush().context("failed to flush")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use relframe_core::testutil::relation;

    use super::*;

    #[test]
    fn header_then_rows() {
        let rel = relation(&["SId", "Title"], &[&["12", "db, systems"]]);
        let mut buf = Vec::new();
        write_relation(&mut buf, &rel, &DialectOptions::default()).unwrap();
        assert_eq!("SId,Title\n12,|db, systems|\n", String::from_utf8(buf).unwrap());
    }

    #[test]
    fn ordered_source() {
        let rel = relation(&["v"], &[&["2"], &["10"], &["1"]]);
        let sorted = rel.sort(&["v"], false).unwrap();
        let mut buf = Vec::new();
        write_relation(&mut buf, &sorted, &DialectOptions::with_delimiter(";").unwrap()).unwrap();
        assert_eq!("v\n1\n2\n10\n", String::from_utf8(buf).unwrap());
    }
}
