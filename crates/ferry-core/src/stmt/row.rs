use super::{Type, Value};
use crate::{Error, Result};

use indexmap::IndexMap;

/// One fetched row: column names mapped to values, in select order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Returns the raw value of `column`.
    ///
    /// Column names are matched exactly first and then ignoring ASCII case,
    /// since some databases fold unquoted identifiers.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column).or_else(|| {
            self.columns
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(column))
                .map(|(_, value)| value)
        })
    }

    /// Reads `column` converted to `ty`.
    pub fn read(&self, column: &str, ty: &Type) -> Result<Value> {
        let value = self
            .get(column)
            .ok_or_else(|| Error::no_such_column(column))?;
        ty.cast(value.clone())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Consumes the row, yielding its values in select order.
    pub fn into_values(self) -> impl Iterator<Item = Value> {
        self.columns.into_values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}
