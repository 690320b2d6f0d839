use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use relframe_error::{RelError, Result};
use relframe_parser::condition::{ComparisonOperator, JoinCondition, RawCondition};
use tracing::debug;

use super::{OrderedRelation, Relation};
use crate::compare::compare_text;
use crate::row::{NULL_TEXT, Row};
use crate::schema::Schema;

/// Right side of a join, prepared for probing with values from the left.
///
/// Equality conditions build a hash table on the right column. Other
/// comparisons fall back to scanning every right row.
enum ProbeTable<'a> {
    Hashed(HashMap<&'a str, Vec<&'a Row>>),
    Scan {
        rows: Vec<&'a Row>,
        right_idx: usize,
        op: ComparisonOperator,
    },
}

impl<'a> ProbeTable<'a> {
    fn build(right: &'a Relation, right_idx: usize, op: ComparisonOperator) -> Self {
        match op {
            ComparisonOperator::Eq => {
                let mut table: HashMap<&str, Vec<&Row>> = HashMap::new();
                for row in &right.rows {
                    table.entry(row.value(right_idx)).or_default().push(row);
                }
                ProbeTable::Hashed(table)
            }
            op => ProbeTable::Scan {
                rows: right.rows.iter().collect(),
                right_idx,
                op,
            },
        }
    }

    /// Right rows satisfying the condition against a left value.
    fn probe<'b>(&'b self, left: &'b str) -> Box<dyn Iterator<Item = &'a Row> + 'b> {
        match self {
            ProbeTable::Hashed(table) => match table.get(left) {
                Some(rows) => Box::new(rows.iter().copied()),
                None => Box::new(std::iter::empty()),
            },
            ProbeTable::Scan {
                rows,
                right_idx,
                op,
            } => Box::new(
                rows.iter()
                    .copied()
                    .filter(move |row| compare_text(*op, left, row.value(*right_idx))),
            ),
        }
    }
}

/// A parsed join condition with its columns resolved against both sides.
struct BoundJoinCondition {
    condition: JoinCondition,
    left_idx: usize,
    right_idx: usize,
}

impl BoundJoinCondition {
    fn try_new(left: &Relation, right: &Relation, condition: &str) -> Result<Self> {
        let condition = JoinCondition::parse(condition)?;
        let left_idx = left.schema.index_of(&condition.left)?;
        let right_idx = right.schema.index_of(&condition.right)?;
        Ok(BoundJoinCondition {
            condition,
            left_idx,
            right_idx,
        })
    }
}

impl Relation {
    /// Cartesian product of two relations.
    ///
    /// Errors if the relations share a column name.
    pub fn product(&self, other: &Relation) -> Result<Relation> {
        let schema = self.schema.concat(&other.schema)?;

        let mut rows = HashSet::with_capacity(self.len() * other.len());
        for left in &self.rows {
            for right in &other.rows {
                rows.insert(left.concat(right));
            }
        }

        debug!(left = self.len(), right = other.len(), output = rows.len(), "product");

        Ok(Relation::from_parts(Arc::new(schema), rows))
    }

    /// Rows of `self` followed by rows of `other`, keeping duplicates.
    ///
    /// Both relations must have identical schemas. Each side's rows are
    /// emitted in canonical order.
    pub fn union(&self, other: &Relation) -> Result<OrderedRelation> {
        if self.schema != other.schema {
            return Err(RelError::SchemaMismatch {
                left: self.columns().to_vec(),
                right: other.columns().to_vec(),
            });
        }

        let rows: Vec<_> = self
            .sorted_rows()
            .into_iter()
            .chain(other.sorted_rows())
            .cloned()
            .collect();

        debug!(left = self.len(), right = other.len(), output = rows.len(), "union");

        Ok(OrderedRelation::from_parts(self.schema.clone(), rows))
    }

    /// Inner join on a condition of the form `<left col> <op> <right col>`.
    ///
    /// The two condition columns are dropped from the output, which is
    /// otherwise the concatenation of both schemas.
    pub fn join(&self, other: &Relation, condition: &str) -> Result<Relation> {
        let bound = BoundJoinCondition::try_new(self, other, condition)?;
        let cond = &bound.condition;

        let left_keep: Vec<_> = (0..self.schema.len())
            .filter(|&idx| !cond.references(&self.columns()[idx]))
            .collect();
        let right_keep: Vec<_> = (0..other.schema.len())
            .filter(|&idx| !cond.references(&other.columns()[idx]))
            .collect();

        let schema = Schema::try_new(
            left_keep
                .iter()
                .map(|&idx| self.columns()[idx].clone())
                .chain(right_keep.iter().map(|&idx| other.columns()[idx].clone())),
        )?;

        let table = ProbeTable::build(other, bound.right_idx, cond.op);
        let mut rows = HashSet::new();
        for left in &self.rows {
            for right in table.probe(left.value(bound.left_idx)) {
                rows.insert(left.project(&left_keep).concat(&right.project(&right_keep)));
            }
        }

        debug!(%cond, left = self.len(), right = other.len(), output = rows.len(), "join");

        Ok(Relation::from_parts(Arc::new(schema), rows))
    }

    /// Rows of `self` matching at least one row of `other`.
    pub fn semijoin(&self, other: &Relation, condition: &str) -> Result<Relation> {
        let bound = BoundJoinCondition::try_new(self, other, condition)?;
        let table = ProbeTable::build(other, bound.right_idx, bound.condition.op);

        let rows: HashSet<_> = self
            .rows
            .iter()
            .filter(|left| table.probe(left.value(bound.left_idx)).next().is_some())
            .cloned()
            .collect();

        debug!(cond = %bound.condition, left = self.len(), right = other.len(), output = rows.len(), "semijoin");

        Ok(Relation::from_parts(self.schema.clone(), rows))
    }

    /// Rows of `self` whose left condition column equals the right condition
    /// column of no row in `other`.
    ///
    /// The comparison operator is not interpreted, the condition is always
    /// evaluated as equality.
    pub fn antijoin(&self, other: &Relation, condition: &str) -> Result<Relation> {
        let raw = RawCondition::split(condition).map_err(|reason| RelError::MalformedCondition {
            condition: condition.to_string(),
            reason,
        })?;
        let left_idx = self.schema.index_of(raw.left)?;
        let right_idx = other.schema.index_of(raw.right)?;

        let right_values: HashSet<&str> = other.rows.iter().map(|row| row.value(right_idx)).collect();
        let rows: HashSet<_> = self
            .rows
            .iter()
            .filter(|left| !right_values.contains(left.value(left_idx)))
            .cloned()
            .collect();

        debug!(%condition, left = self.len(), right = other.len(), output = rows.len(), "antijoin");

        Ok(Relation::from_parts(self.schema.clone(), rows))
    }

    /// Left outer join.
    ///
    /// Keeps every column of both sides. Left rows without a match are padded
    /// with `NULL` placeholders.
    pub fn outerjoin(&self, other: &Relation, condition: &str) -> Result<Relation> {
        let bound = BoundJoinCondition::try_new(self, other, condition)?;
        let schema = self.schema.concat(&other.schema)?;

        let padding: Row = std::iter::repeat_n(NULL_TEXT, other.schema.len()).collect();
        let table = ProbeTable::build(other, bound.right_idx, bound.condition.op);

        let mut rows = HashSet::new();
        let mut unmatched = 0;
        for left in &self.rows {
            let mut matched = false;
            for right in table.probe(left.value(bound.left_idx)) {
                matched = true;
                rows.insert(left.concat(right));
            }
            if !matched {
                unmatched += 1;
                rows.insert(left.concat(&padding));
            }
        }

        debug!(cond = %bound.condition, left = self.len(), right = other.len(), unmatched, output = rows.len(), "outerjoin");

        Ok(Relation::from_parts(Arc::new(schema), rows))
    }
}
