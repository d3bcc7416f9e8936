use super::Operation;
use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectByKey {
    /// Which table to select from
    pub table: String,

    /// Column the key is matched against
    pub key_column: String,

    /// Key to fetch
    pub key: Value,
}

impl From<SelectByKey> for Operation {
    fn from(value: SelectByKey) -> Self {
        Self::SelectByKey(value)
    }
}
