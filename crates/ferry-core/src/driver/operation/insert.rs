use super::Operation;
use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Which table to insert into
    pub table: String,

    /// Column name and value pairs, in declaration order
    pub columns: Vec<(String, Value)>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
