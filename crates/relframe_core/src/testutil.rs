//! Test utilities.
//!
//! Note this isn't behind a `#[cfg(test)]` flag since this should be usable
//! outside of this crate.
//!
//! Should not be used outside of tests.

use crate::relation::{Relation, Tabular};
use crate::row::Row;
use crate::schema::Schema;

/// Build a relation from string literals.
///
/// Panics if the columns or rows are invalid.
pub fn relation(columns: &[&str], rows: &[&[&str]]) -> Relation {
    let schema = Schema::try_new(columns.iter().copied()).unwrap();
    let rows = rows.iter().map(|r| r.iter().copied().collect::<Row>());
    Relation::try_new(schema, rows).unwrap()
}

/// Rows of a tabular value as owned strings, sorted.
pub fn sorted_values<T: Tabular>(source: &T) -> Vec<Vec<String>> {
    let mut rows: Vec<_> = source.iter_rows().map(|r| r.values().to_vec()).collect();
    rows.sort();
    rows
}

/// Asserts that a relation contains exactly the given rows, in any order.
pub fn assert_rows_eq(rel: &Relation, expected: &[&[&str]]) {
    let mut expected: Vec<Vec<String>> = expected
        .iter()
        .map(|r| r.iter().map(|v| v.to_string()).collect())
        .collect();
    expected.sort();
    expected.dedup();
    assert_eq!(expected, sorted_values(rel));
}

pub fn student() -> Relation {
    relation(
        &["SId", "SName", "GradYear", "MajorId"],
        &[
            &["1", "joe", "2021", "10"],
            &["2", "amy", "2020", "20"],
            &["3", "max", "2022", "10"],
            &["4", "sue", "2022", "20"],
            &["5", "bob", "2020", "30"],
            &["6", "kim", "2020", "20"],
            &["7", "art", "2021", "30"],
            &["8", "pat", "2019", "20"],
            &["9", "lee", "2021", "10"],
        ],
    )
}

pub fn enroll() -> Relation {
    relation(
        &["EId", "StudentId", "SectionId", "Grade"],
        &[
            &["14", "1", "13", "A"],
            &["24", "1", "43", "C"],
            &["34", "2", "43", "B+"],
            &["44", "4", "33", "B"],
            &["54", "4", "53", "A"],
            &["64", "6", "53", "A"],
        ],
    )
}

pub fn dept() -> Relation {
    relation(
        &["DId", "DName"],
        &[&["10", "compsci"], &["20", "math"], &["30", "drama"]],
    )
}
