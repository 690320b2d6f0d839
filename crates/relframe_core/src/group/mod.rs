//! Group by and aggregation.

pub mod aggregate;

use std::sync::Arc;

use aggregate::{
    AggregateFunction,
    AggregateState,
    CountState,
    MaxState,
    MeanState,
    MedianState,
    MinState,
    SumState,
};
use hashbrown::HashSet;
use indexmap::IndexMap;
use relframe_error::{RelError, Result};
use tracing::debug;

use crate::relation::Relation;
use crate::row::{NULL_TEXT, Row};
use crate::schema::Schema;

/// Rows of a relation grouped by key columns, waiting for an aggregate.
///
/// Only the first key column drives bucketing. Every aggregate produces a two
/// column relation of `(key, <agg>_<column>)`.
#[derive(Debug, Clone)]
pub struct GroupAggregator<'a> {
    source: &'a Relation,
    keys: Vec<String>,
    /// Position of the first key column in the source.
    key_idx: usize,
}

impl<'a> GroupAggregator<'a> {
    pub(crate) fn try_new<S: AsRef<str>>(source: &'a Relation, keys: &[S]) -> Result<Self> {
        let indices = source.schema().indices_of(keys)?;
        let key_idx = *indices.first().ok_or_else(|| {
            RelError::invalid_argument("Group by requires at least one key column")
        })?;

        Ok(GroupAggregator {
            source,
            keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
            key_idx,
        })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn source(&self) -> &'a Relation {
        self.source
    }

    /// Number of rows per bucket.
    pub fn count(&self, column: &str) -> Result<Relation> {
        self.aggregate::<CountState>(AggregateFunction::Count, column)
    }

    /// Integer sum per bucket.
    pub fn sum(&self, column: &str) -> Result<Relation> {
        self.aggregate::<SumState>(AggregateFunction::Sum, column)
    }

    pub fn max(&self, column: &str) -> Result<Relation> {
        self.aggregate::<MaxState>(AggregateFunction::Max, column)
    }

    pub fn min(&self, column: &str) -> Result<Relation> {
        self.aggregate::<MinState>(AggregateFunction::Min, column)
    }

    /// Mean per bucket, rounded to two decimal places.
    pub fn mean(&self, column: &str) -> Result<Relation> {
        self.aggregate::<MeanState>(AggregateFunction::Mean, column)
    }

    pub fn median(&self, column: &str) -> Result<Relation> {
        self.aggregate::<MedianState>(AggregateFunction::Median, column)
    }

    /// Compute any aggregate by name.
    pub fn apply(&self, function: AggregateFunction, column: &str) -> Result<Relation> {
        match function {
            AggregateFunction::Count => self.count(column),
            AggregateFunction::Sum => self.sum(column),
            AggregateFunction::Max => self.max(column),
            AggregateFunction::Min => self.min(column),
            AggregateFunction::Mean => self.mean(column),
            AggregateFunction::Median => self.median(column),
        }
    }

    fn aggregate<S: AggregateState>(
        &self,
        function: AggregateFunction,
        column: &str,
    ) -> Result<Relation> {
        let value_idx = self.source.schema().index_of(column)?;
        let schema = Schema::try_new([
            self.keys[0].clone(),
            function.output_column(column),
        ])?;

        let mut buckets: IndexMap<&str, S> = IndexMap::new();
        for row in self.source.sorted_rows() {
            buckets
                .entry(row.value(self.key_idx))
                .or_default()
                .update(row.value(value_idx))?;
        }

        let num_buckets = buckets.len();
        let mut rows = HashSet::with_capacity(num_buckets);
        for (key, state) in buckets {
            let value = state.finalize()?.unwrap_or_else(|| NULL_TEXT.to_string());
            rows.insert(Row::new(vec![key.to_string(), value]));
        }

        debug!(%function, %column, key = %self.keys[0], buckets = num_buckets, "aggregate");

        Ok(Relation::from_parts(Arc::new(schema), rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Tabular;
    use crate::testutil::{assert_rows_eq, relation, student};

    #[test]
    fn count_by_grad_year() {
        logutil::configure_test_logger();
        let s = student();
        let rel = s.groupby(&["GradYear"]).unwrap().count("SName").unwrap();
        assert_eq!(&["GradYear", "count_SName"], rel.columns());
        assert_rows_eq(
            &rel,
            &[
                &["2021", "3"],
                &["2020", "3"],
                &["2022", "2"],
                &["2019", "1"],
            ],
        );
    }

    #[test]
    fn count_matches_manual_count() {
        let s = student();
        let rel = s.groupby(&["MajorId"]).unwrap().count("SId").unwrap();
        for view in rel.iter_views() {
            let key = view.get("MajorId").unwrap();
            let expected = s
                .iter_views()
                .filter(|v| v.get("MajorId").unwrap() == key)
                .count();
            assert_eq!(expected.to_string(), view.get("count_SId").unwrap());
        }
    }

    #[test]
    fn sum_max_min() {
        let s = student();
        let group = s.groupby(&["GradYear"]).unwrap();
        assert_rows_eq(
            &group.sum("MajorId").unwrap(),
            &[
                &["2021", "50"],
                &["2022", "30"],
                &["2020", "70"],
                &["2019", "20"],
            ],
        );
        assert_rows_eq(
            &group.max("MajorId").unwrap(),
            &[
                &["2021", "30"],
                &["2022", "20"],
                &["2020", "30"],
                &["2019", "20"],
            ],
        );
        assert_rows_eq(
            &group.min("MajorId").unwrap(),
            &[
                &["2021", "10"],
                &["2022", "10"],
                &["2020", "20"],
                &["2019", "20"],
            ],
        );
    }

    #[test]
    fn mean_by_major() {
        let s = student();
        let rel = s.groupby(&["MajorId"]).unwrap().mean("GradYear").unwrap();
        assert_rows_eq(
            &rel,
            &[
                &["10", "2021.33"],
                &["20", "2020.25"],
                &["30", "2020.5"],
            ],
        );
    }

    #[test]
    fn mean_rounds_ties_to_even() {
        let rel = relation(
            &["k", "id", "v"],
            &[
                &["x", "1", "1"],
                &["x", "2", "1"],
                &["x", "3", "1"],
                &["x", "4", "1"],
                &["x", "5", "1"],
                &["x", "6", "1"],
                &["x", "7", "1"],
                &["x", "8", "2"],
            ],
        );
        let out = rel.groupby(&["k"]).unwrap().mean("v").unwrap();
        assert_rows_eq(&out, &[&["x", "1.12"]]);
    }

    #[test]
    fn median_by_grad_year() {
        let s = student();
        let rel = s.groupby(&["GradYear"]).unwrap().median("MajorId").unwrap();
        assert_rows_eq(
            &rel,
            &[
                &["2020", "20"],
                &["2021", "10"],
                &["2022", "15.0"],
                &["2019", "20"],
            ],
        );
    }

    #[test]
    fn only_first_key_buckets() {
        let s = student();
        let rel = s
            .groupby(&["GradYear", "MajorId"])
            .unwrap()
            .count("SId")
            .unwrap();
        assert_eq!(&["GradYear", "count_SId"], rel.columns());
        assert_eq!(4, rel.len());
    }

    #[test]
    fn apply_by_function() {
        let s = student();
        let group = s.groupby(&["GradYear"]).unwrap();
        for function in AggregateFunction::ALL {
            let rel = group.apply(function, "MajorId").unwrap();
            assert_eq!(4, rel.len());
            assert_eq!(function.output_column("MajorId"), rel.columns()[1]);
        }
    }

    #[test]
    fn errors() {
        let s = student();
        let empty: &[&str] = &[];
        assert!(matches!(
            s.groupby(empty),
            Err(RelError::InvalidArgument(_))
        ));
        assert!(matches!(
            s.groupby(&["Year"]),
            Err(RelError::UnknownColumn { .. })
        ));
        let group = s.groupby(&["GradYear"]).unwrap();
        assert!(matches!(
            group.sum("Age"),
            Err(RelError::UnknownColumn { .. })
        ));
        assert!(matches!(
            group.sum("SName"),
            Err(RelError::ParseError { .. })
        ));
    }

    #[test]
    fn empty_relation_has_no_buckets() {
        let rel = relation(&["k", "v"], &[]);
        let out = rel.groupby(&["k"]).unwrap().mean("v").unwrap();
        assert!(out.is_empty());
        assert_eq!(&["k", "mean_v"], out.columns());
    }
}
