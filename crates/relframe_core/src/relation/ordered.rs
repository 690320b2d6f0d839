use std::fmt;
use std::sync::Arc;

use hashbrown::HashSet;

use super::{Relation, Tabular};
use crate::config::DisplayConfig;
use crate::format::PrettyTable;
use crate::row::Row;
use crate::schema::Schema;

/// An ordered sequence of rows sharing a schema.
///
/// Produced by `sort` and `union`. Unlike `Relation`, rows are never
/// deduplicated and their order is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedRelation {
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl OrderedRelation {
    pub(crate) fn from_parts(schema: Arc<Schema>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == schema.len()));
        OrderedRelation { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows, in order.
    pub fn head(&self, n: usize) -> OrderedRelation {
        let n = n.min(self.rows.len());
        OrderedRelation::from_parts(self.schema.clone(), self.rows[..n].to_vec())
    }

    /// Collapse into a set, dropping duplicates and order.
    pub fn into_relation(self) -> Relation {
        let rows: HashSet<_> = self.rows.into_iter().collect();
        Relation::from_parts(self.schema, rows)
    }

    pub fn pretty<'a>(&'a self, config: &'a DisplayConfig) -> PrettyTable<'a> {
        PrettyTable::new(&self.schema, &self.rows, config)
    }
}

impl Tabular for OrderedRelation {
    fn schema(&self) -> &Schema {
        OrderedRelation::schema(self)
    }

    fn iter_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl fmt::Display for OrderedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = DisplayConfig::default();
        write!(f, "{}", self.pretty(&config))
    }
}
