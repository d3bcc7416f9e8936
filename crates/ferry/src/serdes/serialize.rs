use super::SerDes;
use crate::{stmt::Value, Db, Entity, Error, Field, Result};

use std::rc::Rc;
use tracing::debug;

impl<T: Entity> SerDes<T> {
    /// Writes an entity. A new row receives every non-null field; an
    /// existing row receives only its non-null mutable fields.
    pub fn serialize(&self, db: &mut Db, entity: &T) -> Result<()> {
        let key = self.primary.get(entity);
        let driver = db.driver();

        if !driver.value_exists(&self.table, self.primary.name(), &key)? {
            let columns = columns(self.fields.iter(), entity);
            debug!(entity = T::name(), %key, columns = columns.len(), "inserting");
            return driver.insert(&self.table, columns);
        }

        let columns = columns(self.mutable_fields(), entity);
        if columns.is_empty() {
            debug!(entity = T::name(), %key, "no mutable values to update");
            return Ok(());
        }

        debug!(entity = T::name(), %key, columns = columns.len(), "updating");
        driver.update(&self.table, self.primary.name(), &key, columns)?;
        Ok(())
    }

    /// Returns the largest stored primary key, or `None` for an empty table.
    pub fn max_key(&self, db: &mut Db) -> Result<Option<Value>> {
        db.driver()
            .max(&self.table, self.primary.name(), self.primary.ty())
    }

    /// Returns a key one past the largest stored one, starting from `1`.
    /// Only integer primary fields are numbered this way.
    pub fn next_id(&self, db: &mut Db) -> Result<i64> {
        let ty = self.primary.ty();
        if !ty.is_integer() {
            return Err(Error::unsupported_type(
                ty,
                format!("primary field of `{}` is not numbered", T::name()),
            ));
        }

        let next = match self.max_key(db)? {
            Some(max) => max.as_i64().map_or(1, |max| max + 1),
            None => 1,
        };

        debug!(entity = T::name(), next, "next id");
        Ok(next)
    }
}

fn columns<'a, T: Entity>(
    fields: impl Iterator<Item = &'a Rc<Field<T>>>,
    entity: &T,
) -> Vec<(String, Value)> {
    fields
        .map(|field| (field.name().to_string(), field.get(entity)))
        .filter(|(_, value)| !value.is_null())
        .collect()
}
