//! Delimited text files in and out of relations.
pub mod dialect;
pub mod reader;
pub mod writer;

pub use dialect::{DialectOptions, ReadOptions};
pub use reader::{read_relation, read_relation_from_reader};
pub use writer::write_relation;
