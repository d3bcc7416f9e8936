use super::{Name, Statement, Value};

/// Updates the row identified by a single key column.
#[derive(Debug, Clone)]
pub struct Update {
    pub table: Name,
    pub assignments: Vec<(Name, Value)>,
    pub key_column: Name,
    pub key: Value,
}

impl Statement {
    pub fn update(
        table: impl Into<Name>,
        key_column: impl Into<Name>,
        key: Value,
        assignments: Vec<(String, Value)>,
    ) -> Self {
        Update {
            table: table.into(),
            assignments: assignments
                .into_iter()
                .map(|(column, value)| (Name::from(column), value))
                .collect(),
            key_column: key_column.into(),
            key,
        }
        .into()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
