use super::Operation;
use crate::schema::db::ForeignKey;

#[derive(Debug, Clone, PartialEq)]
pub struct AddForeignKey {
    pub foreign_key: ForeignKey,
}

impl From<AddForeignKey> for Operation {
    fn from(value: AddForeignKey) -> Self {
        Self::AddForeignKey(value)
    }
}
