use std::fs::File;
use std::io::Read;
use std::path::Path;

use relframe_core::{Relation, Row, Schema};
use relframe_error::{RelError, Result, ResultExt};
use tracing::debug;

use crate::dialect::ReadOptions;

/// Read a relation from a delimited file.
///
/// The first record is the header naming the columns. Every following record
/// is a row. All values are kept as text.
pub fn read_relation(path: impl AsRef<Path>, opts: &ReadOptions) -> Result<Relation> {
    let path = path.as_ref();
    let file = File::open(path)
        .context_fn(|| format!("failed to open '{}'", path.display()))?;
    let relation = read_relation_from_reader(file, opts)?;

    debug!(path = %path.display(), rows = relation.len(), columns = relation.columns().len(), "read relation");

    Ok(relation)
}

/// Read a relation from any reader producing delimited text.
pub fn read_relation_from_reader<R: Read>(reader: R, opts: &ReadOptions) -> Result<Relation> {
    let mut builder = opts.dialect.reader_builder();
    if opts.trim {
        builder.trim(csv::Trim::All);
    }
    let mut reader = builder.from_reader(reader);

    let header = reader.headers().context("failed to read header")?;
    if header.is_empty() {
        return Err(RelError::invalid_argument("Missing header record"));
    }
    let schema = Schema::try_new(header.iter())?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to read record")?;
        rows.push(record.iter().collect::<Row>());
    }

    Relation::try_new(schema, rows)
}
