mod add_foreign_key;
pub use add_foreign_key::AddForeignKey;

mod copy_table;
pub use copy_table::CopyTable;

mod create_table;
pub use create_table::CreateTable;

mod drop_table;
pub use drop_table::DropTable;

mod insert;
pub use insert::Insert;

mod name;
pub use name::Name;

mod pragma;
pub use pragma::Pragma;

mod rename_table;
pub use rename_table::RenameTable;

mod select;
pub use select::{Projection, Select};

mod update;
pub use update::Update;

pub use ferry_core::{
    schema::db::{ColumnDef, ForeignKey, Type},
    stmt::Value,
};

#[derive(Debug, Clone)]
pub enum Statement {
    AddForeignKey(AddForeignKey),
    CopyTable(CopyTable),
    CreateTable(CreateTable),
    DropTable(DropTable),
    Insert(Insert),
    Pragma(Pragma),
    RenameTable(RenameTable),
    Select(Select),
    Update(Update),
}

impl Statement {
    /// Returns `true` if executing the statement yields rows.
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select(_))
    }
}
