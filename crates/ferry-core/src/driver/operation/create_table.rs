use super::Operation;
use crate::schema::db::ColumnDef;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table to create
    pub table: String,

    /// Name of the primary key column
    pub primary_key: String,

    /// Column declarations, in order
    pub columns: Vec<ColumnDef>,
}

impl From<CreateTable> for Operation {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
