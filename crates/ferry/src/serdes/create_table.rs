use super::{SerDes, Stage};
use crate::{Db, Entity, Result};

use tracing::debug;

impl<T: Entity> SerDes<T> {
    /// Creates the table, then each table it links to that is not already
    /// being created, then a foreign key constraint per foreign field.
    ///
    /// Every table reachable through foreign fields is created once per call,
    /// however many paths lead to it.
    pub fn create_table(&self, db: &mut Db) -> Result<()> {
        let outermost = db.begin_create();
        let created = self.create_linked_tables(db);

        if outermost {
            db.end_create();
        }

        created
    }

    fn create_linked_tables(&self, db: &mut Db) -> Result<()> {
        let _guard = self.enter(Stage::CreateTable);

        let storage_types = db.driver().capability().storage_types.clone();
        let columns = self
            .fields
            .iter()
            .map(|field| field.column_def(&storage_types))
            .collect::<Result<Vec<_>>>()?;

        debug!(entity = T::name(), table = %self.table, "creating table");
        db.driver()
            .create_table(&self.table, self.primary.name(), columns)?;
        db.mark_created(&self.table);

        for field in self.foreign_fields() {
            let Some(link) = field.link() else {
                continue;
            };

            let target = link.target(db.registry())?;

            if !target.is_creating_table() && !db.is_created(target.table()) {
                target.create_table(db)?;
            }

            debug!(
                table = %self.table,
                column = field.name(),
                references = target.table(),
                "adding foreign key"
            );
            db.driver().add_foreign_key_constraint(
                &self.table,
                field.name(),
                target.table(),
                link.referenced_name(),
            )?;
        }

        Ok(())
    }
}
