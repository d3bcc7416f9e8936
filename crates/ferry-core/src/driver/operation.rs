mod add_foreign_key;
pub use add_foreign_key::AddForeignKey;

mod create_table;
pub use create_table::CreateTable;

mod insert;
pub use insert::Insert;

mod max;
pub use max::Max;

mod select_by_key;
pub use select_by_key::SelectByKey;

mod table_exists;
pub use table_exists::TableExists;

mod update;
pub use update::Update;

mod value_exists;
pub use value_exists::ValueExists;

/// One request to the storage driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Add a foreign-key constraint to an existing table
    AddForeignKey(AddForeignKey),

    /// Create a table
    CreateTable(CreateTable),

    /// Insert one row
    Insert(Insert),

    /// Read the largest value of a column
    Max(Max),

    /// Fetch at most one row by a single column value
    SelectByKey(SelectByKey),

    /// Check whether a table exists
    TableExists(TableExists),

    /// Update one row identified by its key
    Update(Update),

    /// Check whether any row holds a value in a column
    ValueExists(ValueExists),
}

impl Operation {
    /// The table the operation targets.
    pub fn table(&self) -> &str {
        match self {
            Self::AddForeignKey(op) => &op.foreign_key.table,
            Self::CreateTable(op) => &op.table,
            Self::Insert(op) => &op.table,
            Self::Max(op) => &op.table,
            Self::SelectByKey(op) => &op.table,
            Self::TableExists(op) => &op.table,
            Self::Update(op) => &op.table,
            Self::ValueExists(op) => &op.table,
        }
    }

    pub fn is_add_foreign_key(&self) -> bool {
        matches!(self, Self::AddForeignKey(_))
    }

    pub fn is_create_table(&self) -> bool {
        matches!(self, Self::CreateTable(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }

    pub fn is_select_by_key(&self) -> bool {
        matches!(self, Self::SelectByKey(_))
    }
}
