use std::io::Write;

use relframe_core::OrderedRelation;
use relframe_error::Result;

use crate::args::{GlobalOpts, OutputMode};

/// Write a relation to `out` in the configured output mode.
pub fn write_output<W: Write>(out: &mut W, rel: &OrderedRelation, opts: &GlobalOpts) -> Result<()> {
    match opts.mode {
        OutputMode::Table => {
            let config = opts.display_config();
            writeln!(out, "{}", rel.pretty(&config))?;
        }
        OutputMode::Csv => {
            let dialect = opts.dialect()?;
            match opts.max_rows {
                Some(n) => relframe_csv::write_relation(&mut *out, &rel.head(n), &dialect)?,
                None => relframe_csv::write_relation(&mut *out, rel, &dialect)?,
            }
        }
    }
    Ok(())
}
