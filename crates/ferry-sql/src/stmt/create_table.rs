use super::{ColumnDef, ForeignKey, Name, Statement};

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: Name,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Primary key column
    pub primary_key: Name,

    /// Foreign keys declared inline with the table
    pub foreign_keys: Vec<ForeignKey>,
}

impl Statement {
    pub fn create_table(
        name: impl Into<Name>,
        primary_key: impl Into<Name>,
        columns: Vec<ColumnDef>,
    ) -> Self {
        CreateTable {
            name: name.into(),
            columns,
            primary_key: primary_key.into(),
            foreign_keys: vec![],
        }
        .into()
    }

    /// Like [`Statement::create_table`], also declaring foreign keys inline.
    pub fn create_table_with_foreign_keys(
        name: impl Into<Name>,
        primary_key: impl Into<Name>,
        columns: Vec<ColumnDef>,
        foreign_keys: Vec<ForeignKey>,
    ) -> Self {
        CreateTable {
            name: name.into(),
            columns,
            primary_key: primary_key.into(),
            foreign_keys,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
