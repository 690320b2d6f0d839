use relframe_error::Result;

use crate::schema::Schema;

/// Text standing in for a missing value, such as the right side of an
/// unmatched outer join row.
pub const NULL_TEXT: &str = "NULL";

/// A single tuple. Values are positionally aligned with some schema, which
/// the row itself doesn't carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Row {
    values: Box<[String]>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Row {
            values: values.into_boxed_slice(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at `idx`.
    ///
    /// Panics if out of bounds. Callers resolve indices against the schema
    /// the row belongs to.
    pub(crate) fn value(&self, idx: usize) -> &str {
        &self.values[idx]
    }

    /// New row containing values at the given indices, in order.
    pub fn project(&self, indices: &[usize]) -> Row {
        Row::new(indices.iter().map(|&idx| self.values[idx].clone()).collect())
    }

    /// New row with the values of `other` appended to the values of `self`.
    pub fn concat(&self, other: &Row) -> Row {
        Row::new(self.values.iter().chain(other.values.iter()).cloned().collect())
    }

    /// New row with `value` appended.
    pub fn append(&self, value: String) -> Row {
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.extend_from_slice(&self.values);
        values.push(value);
        Row::new(values)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A row paired with its schema, providing access by column name.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    schema: &'a Schema,
    row: &'a Row,
}

impl<'a> RowView<'a> {
    pub fn new(schema: &'a Schema, row: &'a Row) -> Self {
        debug_assert_eq!(schema.len(), row.len());
        RowView { schema, row }
    }

    /// Get the value for a column, erroring if the column doesn't exist.
    pub fn get(&self, column: &str) -> Result<&'a str> {
        let idx = self.schema.index_of(column)?;
        Ok(self.row.value(idx))
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use relframe_error::RelError;

    use super::*;

    #[test]
    fn project_and_concat() {
        let row: Row = ["1", "joe", "2021"].into_iter().collect();
        assert_eq!(&["2021", "1"], row.project(&[2, 0]).values());

        let other: Row = ["14"].into_iter().collect();
        assert_eq!(&["1", "joe", "2021", "14"], row.concat(&other).values());
        assert_eq!(&["14", "x"], other.append("x".to_string()).values());
    }

    #[test]
    fn view_by_name() {
        let schema = Schema::try_new(["SId", "SName"]).unwrap();
        let row: Row = ["1", "joe"].into_iter().collect();
        let view = RowView::new(&schema, &row);

        assert_eq!("joe", view.get("SName").unwrap());
        assert!(matches!(
            view.get("Grade"),
            Err(RelError::UnknownColumn { .. })
        ));
    }
}
