use super::{ForeignKey, Statement};

/// `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY ... REFERENCES ...`
///
/// SQLite has no such statement; its driver rebuilds the table instead.
#[derive(Debug, Clone)]
pub struct AddForeignKey {
    pub foreign_key: ForeignKey,
}

impl Statement {
    pub fn add_foreign_key(foreign_key: ForeignKey) -> Self {
        AddForeignKey { foreign_key }.into()
    }
}

impl From<AddForeignKey> for Statement {
    fn from(value: AddForeignKey) -> Self {
        Self::AddForeignKey(value)
    }
}
