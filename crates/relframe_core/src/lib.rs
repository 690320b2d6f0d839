//! In-memory relational algebra over text-valued relations.
//!
//! Every operator is a pure function producing a new relation. Relations are
//! sets of rows; the only ordered outputs are `sort` and `union`, which
//! produce an [`OrderedRelation`].
pub mod compare;
pub mod config;
pub mod expr;
pub mod format;
pub mod group;
pub mod relation;
pub mod row;
pub mod schema;
pub mod testutil;

pub use config::DisplayConfig;
pub use group::GroupAggregator;
pub use relation::{OrderedRelation, Relation, Tabular};
pub use relframe_parser::condition::ComparisonOperator;
pub use row::{Row, RowView};
pub use schema::Schema;
