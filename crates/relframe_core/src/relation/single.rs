use std::sync::Arc;

use hashbrown::HashSet;
use relframe_error::{RelError, Result};
use relframe_parser::condition::RawCondition;
use tracing::{debug, trace};

use super::{OrderedRelation, Relation};
use crate::compare::{SelectPredicate, compare_text, sort_order};
use crate::expr::BoundExpr;
use crate::group::GroupAggregator;
use crate::row::Row;
use crate::schema::Schema;

/// Operand of a `select` resolved against the schema.
#[derive(Debug, Clone, Copy)]
enum Operand<'a> {
    Column(usize),
    Literal(&'a str),
}

impl Relation {
    /// Filter rows with a condition of the form `<column> <op> <operand>`.
    ///
    /// If the right operand names a column the comparison is between the
    /// two columns of each row, otherwise it's against the literal text.
    pub fn query(&self, query: &str) -> Result<Relation> {
        let malformed = |reason: String| RelError::MalformedQuery {
            query: query.to_string(),
            reason,
        };

        let raw = RawCondition::split(query).map_err(malformed)?;
        let op = raw.operator().map_err(malformed)?;
        let left_idx = self
            .schema
            .position(raw.left)
            .ok_or_else(|| malformed(format!("'{}' is not a column", raw.left)))?;
        let right = match self.schema.position(raw.right) {
            Some(idx) => Operand::Column(idx),
            None => Operand::Literal(raw.right),
        };

        let rows: HashSet<_> = self
            .rows
            .iter()
            .filter(|row| {
                let right = match right {
                    Operand::Column(idx) => row.value(idx),
                    Operand::Literal(lit) => lit,
                };
                compare_text(op, row.value(left_idx), right)
            })
            .cloned()
            .collect();

        debug!(%query, input = self.len(), output = rows.len(), "query");

        Ok(Relation::from_parts(self.schema.clone(), rows))
    }

    /// Restrict the relation to the given columns, in the given order.
    ///
    /// Rows that become identical collapse into one.
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> Result<Relation> {
        let indices = self.schema.indices_of(columns)?;
        let schema = Schema::try_new(columns.iter().map(|c| c.as_ref()))?;

        let rows: HashSet<_> = self.rows.iter().map(|row| row.project(&indices)).collect();

        debug!(%schema, input = self.len(), output = rows.len(), "project");

        Ok(Relation::from_parts(Arc::new(schema), rows))
    }

    /// Rename a single column, keeping its position and values.
    ///
    /// Renaming a column to its own name returns the relation unchanged.
    pub fn rename(&self, old: &str, new: &str) -> Result<Relation> {
        let idx = self.schema.index_of(old)?;
        if old == new {
            return Ok(self.clone());
        }
        if self.schema.contains(new) {
            return Err(RelError::ColumnConflict(new.to_string()));
        }

        let mut columns = self.columns().to_vec();
        columns[idx] = new.to_string();
        let schema = Schema::try_new(columns)?;

        debug!(%old, %new, "rename");

        Ok(Relation::from_parts(Arc::new(schema), self.rows.clone()))
    }

    /// Append a column computed by evaluating `expr` for every row.
    ///
    /// The expression is bound before any row is evaluated, so unknown
    /// identifiers fail even for an empty relation.
    pub fn extend(&self, name: &str, expr: &str) -> Result<Relation> {
        if self.schema.contains(name) {
            return Err(RelError::ColumnConflict(name.to_string()));
        }
        let bound = BoundExpr::parse_and_bind(expr, &self.schema)?;
        let schema = Schema::try_new(self.columns().iter().map(String::as_str).chain([name]))?;

        let mut rows = HashSet::with_capacity(self.len());
        for row in &self.rows {
            let value = bound.eval(row)?;
            trace!(?row, %value, "extend row");
            rows.insert(row.append(value.to_string()));
        }

        debug!(%name, %expr, input = self.len(), output = rows.len(), "extend");

        Ok(Relation::from_parts(Arc::new(schema), rows))
    }

    /// Keep rows for which `predicate` holds.
    ///
    /// Each operand naming a column is replaced with that column's value for
    /// the row being tested. Other operands are passed through as literals.
    pub fn select<P>(&self, predicate: &P, operands: &[&str]) -> Result<Relation>
    where
        P: SelectPredicate + ?Sized,
    {
        let resolved: Vec<_> = operands
            .iter()
            .map(|&op| match self.schema.position(op) {
                Some(idx) => Operand::Column(idx),
                None => Operand::Literal(op),
            })
            .collect();

        let mut values = Vec::with_capacity(resolved.len());
        let mut rows = HashSet::new();
        for row in &self.rows {
            values.clear();
            values.extend(resolved.iter().map(|op| match *op {
                Operand::Column(idx) => row.value(idx),
                Operand::Literal(lit) => lit,
            }));
            if predicate.evaluate(&values)? {
                rows.insert(row.clone());
            }
        }

        debug!(input = self.len(), output = rows.len(), "select");

        Ok(Relation::from_parts(self.schema.clone(), rows))
    }

    /// Sort rows by the given columns.
    ///
    /// Performs one stable pass per column, starting from the last listed
    /// column, so the first listed column ends up as the primary key. Rows
    /// start out in canonical order, making ties deterministic. Duplicates
    /// can't exist in the input, and none are introduced.
    pub fn sort<S: AsRef<str>>(&self, columns: &[S], descending: bool) -> Result<OrderedRelation> {
        let indices = self.schema.indices_of(columns)?;

        let mut rows: Vec<Row> = self.sorted_rows().into_iter().cloned().collect();
        for &idx in indices.iter().rev() {
            rows.sort_by(|a, b| {
                let ord = sort_order(a.value(idx), b.value(idx));
                if descending { ord.reverse() } else { ord }
            });
        }

        debug!(?indices, descending, rows = rows.len(), "sort");

        Ok(OrderedRelation::from_parts(self.schema.clone(), rows))
    }

    /// Group rows for aggregation.
    ///
    /// Every key column must exist, but only the first one is used to
    /// bucket rows.
    pub fn groupby<S: AsRef<str>>(&self, columns: &[S]) -> Result<GroupAggregator<'_>> {
        GroupAggregator::try_new(self, columns)
    }
}
