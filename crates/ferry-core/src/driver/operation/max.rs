use super::Operation;

/// Read the largest value of one column. Answered with a single row holding
/// the value under the column's name, or `Null` for an empty table.
#[derive(Debug, Clone, PartialEq)]
pub struct Max {
    pub table: String,
    pub column: String,
}

impl From<Max> for Operation {
    fn from(value: Max) -> Self {
        Self::Max(value)
    }
}
