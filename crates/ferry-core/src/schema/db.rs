mod column;
pub use column::ColumnDef;

mod foreign_key;
pub use foreign_key::ForeignKey;

mod ty;
pub use ty::Type;
