use super::Operation;
use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ValueExists {
    pub table: String,
    pub column: String,
    pub value: Value,
}

impl From<ValueExists> for Operation {
    fn from(value: ValueExists) -> Self {
        Self::ValueExists(value)
    }
}
