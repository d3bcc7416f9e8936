use super::Operation;
use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Which table to update
    pub table: String,

    /// Column identifying the row
    pub key_column: String,

    /// Key of the row to update
    pub key: Value,

    /// Column name and value pairs to assign, in declaration order
    pub columns: Vec<(String, Value)>,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
