use super::{pending::PendingLink, Arg, Args, Mapping, SerDes, Stage};
use crate::{
    stmt::{Row, Value},
    Db, Entity, Error, Field, Instance, Result,
};

use std::{any::Any, cell::RefCell, rc::Rc};
use tracing::{debug, trace};

impl<T: Entity> SerDes<T> {
    /// Loads the entity whose primary field equals `key`, from the cache
    /// when possible.
    pub fn find(&self, db: &mut Db, key: impl Into<Value>) -> Result<Instance<T>> {
        let key = self.primary.ty().cast(key.into())?;

        if let Some(instance) = self.cached(&key) {
            trace!(entity = T::name(), %key, "cache hit");
            return Ok(instance);
        }

        let row = db
            .driver()
            .select_by_key(&self.table, self.primary.name(), &key)?
            .ok_or_else(|| self.no_such_row(self.primary.name(), &key))?;

        self.deserialize(db, &row)
    }

    /// Loads the entity whose `field` equals `key`. `field` must be unique.
    pub fn find_by(&self, db: &mut Db, field: &Field<T>, key: &Value) -> Result<Instance<T>> {
        if field.identity() == self.primary.identity() {
            return self.find(db, key.clone());
        }

        let key = &field.ty().cast(key.clone())?;

        let cached = self.state.borrow().cache.find(|entity| field.get(entity) == *key);
        if let Some(instance) = cached {
            trace!(entity = T::name(), field = field.name(), %key, "cache hit");
            return Ok(instance);
        }

        let row = db
            .driver()
            .select_by_key(&self.table, field.name(), key)?
            .ok_or_else(|| self.no_such_row(field.name(), key))?;

        self.deserialize(db, &row)
    }

    /// Builds an entity from a row.
    ///
    /// Deserializing re-entrantly, while another row of this entity is still
    /// loading, defers mutable links to entities that are themselves still
    /// loading.
    pub fn deserialize(&self, db: &mut Db, row: &Row) -> Result<Instance<T>> {
        self.deserialize_with(db, row, self.is_deserializing())
    }

    /// Builds an entity from a row. When `careful` is set, mutable links to
    /// entities that are still loading are assigned once those finish.
    pub fn deserialize_with(&self, db: &mut Db, row: &Row, careful: bool) -> Result<Instance<T>> {
        let key = db
            .driver()
            .read_column(row, self.primary.name(), self.primary.ty())?;

        if let Some(instance) = self.cached(&key) {
            trace!(entity = T::name(), %key, "cache hit");
            return Ok(instance);
        }

        // Caches are trimmed once the outermost load is done, so nothing a
        // load in progress refers to is evicted under it.
        let outermost = db.begin_load();
        let loaded = self.load_and_complete(db, row, &key, careful);

        if outermost {
            db.end_load();
        }

        loaded
    }

    fn load_and_complete(
        &self,
        db: &mut Db,
        row: &Row,
        key: &Value,
        careful: bool,
    ) -> Result<Instance<T>> {
        let instance = {
            let _guard = self.enter(Stage::Deserialize);
            self.load(db, row, key, careful)?
        };

        self.complete(db, &instance)?;
        Ok(instance)
    }

    fn load(&self, db: &mut Db, row: &Row, key: &Value, careful: bool) -> Result<Instance<T>> {
        debug!(entity = T::name(), %key, careful, "deserializing");

        let args = {
            let _constructing = self.constructing(key)?;
            self.read_immutable(db, row)?
        };

        // Resolving immutable links may have loaded this same row.
        if let Some(instance) = self.cached(key) {
            trace!(entity = T::name(), %key, "adopting instance loaded while resolving links");
            return Ok(instance);
        }

        let mut args = Args::new(T::name(), args);
        let entity = (self.constructor)(&mut args)?;
        args.finish()?;

        let instance = Rc::new(RefCell::new(entity));
        let over_capacity = {
            let mut state = self.state.borrow_mut();
            state.cache.insert(key.clone(), instance.clone());
            state.cache.is_over_capacity()
        };

        if over_capacity {
            let mapping: Rc<dyn Mapping> = T::serdes(db.registry())?;
            db.trim_later(mapping);
        }

        if let Err(err) = self.assign_mutable(db, row, &instance, careful) {
            self.state.borrow_mut().cache.remove(key);
            self.discard_pending(db, &instance);
            return Err(err);
        }

        Ok(instance)
    }

    /// Drops the links `instance` queued on other mappings before its load
    /// failed.
    fn discard_pending(&self, db: &Db, instance: &Instance<T>) {
        let failed: Rc<dyn Any> = instance.clone();

        for field in self.mutable_fields() {
            let Some(link) = field.link() else {
                continue;
            };

            if let Ok(target) = link.target(db.registry()) {
                target.discard(&failed);
            }
        }
    }

    fn read_immutable(&self, db: &mut Db, row: &Row) -> Result<Vec<Arg>> {
        let mut args = Vec::new();

        for field in self.immutable_fields() {
            let value = db.driver().read_column(row, field.name(), field.ty())?;

            let arg = match field.link() {
                None => Arg::Value(value),
                Some(_) if value.is_null() => Arg::Entity(None),
                Some(link) => Arg::Entity(Some(link.resolve(db, &value)?)),
            };

            args.push(arg);
        }

        Ok(args)
    }

    fn assign_mutable(
        &self,
        db: &mut Db,
        row: &Row,
        instance: &Instance<T>,
        careful: bool,
    ) -> Result<()> {
        for field in self.mutable_fields() {
            let value = db.driver().read_column(row, field.name(), field.ty())?;

            let Some(link) = field.link() else {
                field.set(&mut instance.borrow_mut(), value)?;
                continue;
            };

            if careful && !value.is_null() {
                let target = link.target(db.registry())?;

                if target.is_deserializing() {
                    trace!(
                        entity = T::name(),
                        field = field.name(),
                        key = %value,
                        "deferring link to `{}`",
                        link.target_name()
                    );
                    target.defer(Box::new(PendingLink {
                        entity: instance.clone(),
                        field: field.clone(),
                        key: value,
                    }));
                    continue;
                }
            }

            field.set_from_key(db, instance, &value)?;
        }

        Ok(())
    }

    /// Resolves links that were waiting for this entity to load.
    fn complete(&self, db: &mut Db, instance: &Instance<T>) -> Result<()> {
        let completed: Rc<dyn Any> = instance.clone();

        while let Some(pending) = self.next_pending() {
            pending.resolve(db, &completed)?;
        }

        Ok(())
    }

    fn next_pending(&self) -> Option<Box<dyn super::Pending>> {
        self.state.borrow_mut().pending.pop_front()
    }

    /// Tracks a key whose immutable links are being resolved. A key may be
    /// re-entered once, since a mutable link can lead back to a row whose
    /// construction is underway. Entering it again means the immutable links
    /// form a cycle that no order of construction satisfies.
    fn constructing(&self, key: &Value) -> Result<Constructing<'_, T>> {
        let mut state = self.state.borrow_mut();

        let entered = state.constructing.iter().filter(|k| *k == key).count();
        if entered >= 2 {
            return Err(Error::cyclic_reference(T::name(), key));
        }

        state.constructing.push(key.clone());
        Ok(Constructing { serdes: self })
    }

    fn no_such_row(&self, column: &str, key: &Value) -> Error {
        Error::no_such_row(format!("`{}` where `{column}` = {key:?}", self.table))
    }
}

struct Constructing<'a, T: Entity> {
    serdes: &'a SerDes<T>,
}

impl<T: Entity> Drop for Constructing<'_, T> {
    fn drop(&mut self) {
        self.serdes.state.borrow_mut().constructing.pop();
    }
}
