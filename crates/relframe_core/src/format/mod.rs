pub mod pretty;

pub use pretty::PrettyTable;
