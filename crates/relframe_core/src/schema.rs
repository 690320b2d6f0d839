use std::fmt;

use hashbrown::HashMap;
use relframe_error::{RelError, Result};

/// Ordered, unique column names of a relation.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<String>,
    /// Column name to position in `columns`.
    index: HashMap<String, usize>,
}

impl Schema {
    /// Create a new schema, erroring if any column name is repeated.
    pub fn try_new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(columns.len());
        for (idx, col) in columns.iter().enumerate() {
            if index.insert(col.clone(), idx).is_some() {
                return Err(RelError::ColumnConflict(col.clone()));
            }
        }

        Ok(Schema { columns, index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Position of a column if it exists.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Position of a column, erroring if it doesn't exist.
    pub fn index_of(&self, column: &str) -> Result<usize> {
        self.position(column)
            .ok_or_else(|| RelError::unknown_column(column, &self.columns))
    }

    /// Positions for each of the given columns, in the order given.
    pub fn indices_of<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<usize>> {
        columns.iter().map(|c| self.index_of(c.as_ref())).collect()
    }

    /// Schema containing the columns of `self` followed by the columns of
    /// `other`.
    pub fn concat(&self, other: &Schema) -> Result<Schema> {
        Schema::try_new(self.columns.iter().chain(other.columns.iter()).cloned())
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Schema {}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.columns.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let schema = Schema::try_new(["SId", "SName", "GradYear"]).unwrap();
        assert_eq!(1, schema.index_of("SName").unwrap());
        assert_eq!(vec![2, 0], schema.indices_of(&["GradYear", "SId"]).unwrap());
        assert!(schema.contains("SId"));
        assert!(!schema.contains("sid"));
        assert_eq!("(SId, SName, GradYear)", schema.to_string());
    }

    #[test]
    fn unknown_column() {
        let schema = Schema::try_new(["a"]).unwrap();
        let err = schema.index_of("b").unwrap_err();
        assert!(matches!(err, RelError::UnknownColumn { column, .. } if column == "b"));
    }

    #[test]
    fn duplicate_columns() {
        let err = Schema::try_new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, RelError::ColumnConflict(c) if c == "a"));
    }

    #[test]
    fn concat() {
        let a = Schema::try_new(["a", "b"]).unwrap();
        let b = Schema::try_new(["c"]).unwrap();
        assert_eq!(&["a", "b", "c"], a.concat(&b).unwrap().columns());
        assert!(a.concat(&a).is_err());
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = Schema::try_new(["a", "b"]).unwrap();
        let b = Schema::try_new(["b", "a"]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
