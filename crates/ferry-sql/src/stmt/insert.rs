use super::{Name, Statement, Value};

/// Inserts a single row.
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: Name,
    pub columns: Vec<Name>,
    pub values: Vec<Value>,
}

impl Statement {
    pub fn insert(table: impl Into<Name>, columns: Vec<(String, Value)>) -> Self {
        let (columns, values) = columns
            .into_iter()
            .map(|(column, value)| (Name::from(column), value))
            .unzip();

        Insert {
            table: table.into(),
            columns,
            values,
        }
        .into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
