//! Relations and the operators defined on them.
//!
//! Single table operators live in `single`, operators correlating two
//! relations live in `join`.

mod join;
mod ordered;
mod single;

use std::fmt;
use std::sync::Arc;

use hashbrown::HashSet;
use relframe_error::{RelError, Result};

pub use ordered::OrderedRelation;

use crate::config::DisplayConfig;
use crate::format::PrettyTable;
use crate::row::{Row, RowView};
use crate::schema::Schema;

/// Something with a schema and rows aligned to it.
pub trait Tabular {
    fn schema(&self) -> &Schema;

    /// Iterate the rows in their natural order. For a `Relation` this order
    /// is unspecified.
    fn iter_rows(&self) -> impl Iterator<Item = &Row>;

    fn columns(&self) -> &[String] {
        self.schema().columns()
    }

    /// Iterate rows paired with the schema for by-name access.
    fn iter_views(&self) -> impl Iterator<Item = RowView<'_>> {
        let schema = self.schema();
        self.iter_rows().map(move |row| RowView::new(schema, row))
    }
}

/// An immutable set of rows with a shared schema.
///
/// Duplicate rows are eliminated on construction, and row order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    schema: Arc<Schema>,
    rows: HashSet<Row>,
}

impl Relation {
    /// Create a new relation, checking every row against the schema.
    pub fn try_new<I>(schema: Schema, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let rows = rows.into_iter();
        let mut set = HashSet::with_capacity(rows.size_hint().0);
        for row in rows {
            check_arity(&schema, &row)?;
            set.insert(row);
        }

        Ok(Relation {
            schema: Arc::new(schema),
            rows: set,
        })
    }

    /// Create a relation with no rows.
    pub fn empty(schema: Schema) -> Self {
        Relation {
            schema: Arc::new(schema),
            rows: HashSet::new(),
        }
    }

    /// Assemble a relation from parts produced by an operator. Rows must
    /// already match the schema.
    pub(crate) fn from_parts(schema: Arc<Schema>, rows: HashSet<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == schema.len()));
        Relation { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: &Row) -> bool {
        self.rows.contains(row)
    }

    /// Rows in a canonical order.
    ///
    /// Useful where a deterministic order is wanted, such as display.
    pub fn sorted_rows(&self) -> Vec<&Row> {
        let mut rows: Vec<_> = self.rows.iter().collect();
        rows.sort_unstable();
        rows
    }

    /// Copy of this relation with rows fixed in canonical order.
    pub fn to_ordered(&self) -> OrderedRelation {
        let rows = self.sorted_rows().into_iter().cloned().collect();
        OrderedRelation::from_parts(self.schema.clone(), rows)
    }

    /// Relation containing at most `n` rows of this relation. Which rows are
    /// kept is unspecified.
    pub fn head(&self, n: usize) -> Relation {
        let rows = self.rows.iter().take(n).cloned().collect();
        Relation::from_parts(self.schema.clone(), rows)
    }

    /// Render this relation as a table using the given config.
    ///
    /// Rows are rendered in canonical order.
    pub fn pretty<'a>(&'a self, config: &'a DisplayConfig) -> PrettyTable<'a> {
        PrettyTable::new(&self.schema, self.sorted_rows(), config)
    }
}

impl Tabular for Relation {
    fn schema(&self) -> &Schema {
        Relation::schema(self)
    }

    fn iter_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = DisplayConfig::default();
        write!(f, "{}", self.pretty(&config))
    }
}

pub(crate) fn check_arity(schema: &Schema, row: &Row) -> Result<()> {
    if row.len() != schema.len() {
        return Err(RelError::invalid_argument(format!(
            "Row has {} values, but schema {schema} has {} columns",
            row.len(),
            schema.len()
        )));
    }
    Ok(())
}
