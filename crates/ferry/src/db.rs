use crate::{
    driver::Driver, serdes::Mapping, stmt::Value, Entity, Instance, Registry, Result,
};

use std::{fmt, rc::Rc};

/// A registry of mappings paired with the driver they load from and store
/// into.
pub struct Db {
    registry: Registry,
    driver: Box<dyn Driver>,

    /// Tables created by the outermost `create_table` call in progress.
    created: Option<Vec<String>>,

    /// Set while a load is in progress.
    loading: bool,

    /// Mappings whose caches grew past capacity during the current load.
    overfull: Vec<Rc<dyn Mapping>>,
}

impl Db {
    pub fn new(registry: Registry, driver: impl Driver) -> Db {
        Db {
            registry,
            driver: Box::new(driver),
            created: None,
            loading: false,
            overfull: vec![],
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn driver(&mut self) -> &mut dyn Driver {
        &mut *self.driver
    }

    /// Loads the `T` whose primary field equals `key`.
    pub fn find<T: Entity>(&mut self, key: impl Into<Value>) -> Result<Instance<T>> {
        T::serdes(&self.registry)?.find(self, key)
    }

    /// Inserts `entity`, or updates its mutable fields if a row with its
    /// primary key already exists.
    pub fn save<T: Entity>(&mut self, entity: &T) -> Result<()> {
        T::serdes(&self.registry)?.serialize(self, entity)
    }

    /// Creates the table for `T` along with the tables it links to.
    pub fn create_table<T: Entity>(&mut self) -> Result<()> {
        T::serdes(&self.registry)?.create_table(self)
    }

    /// Returns the largest primary key stored for `T` plus one, or `1` when
    /// the table is empty. The primary field must hold an integer.
    pub fn next_id<T: Entity>(&mut self) -> Result<i64> {
        T::serdes(&self.registry)?.next_id(self)
    }

    pub fn table_exists<T: Entity>(&mut self) -> Result<bool> {
        let serdes = T::serdes(&self.registry)?;
        self.driver.table_exists(serdes.table())
    }

    /// Starts tracking created tables. Returns `false` if an enclosing call
    /// already tracks them.
    pub(crate) fn begin_create(&mut self) -> bool {
        if self.created.is_some() {
            return false;
        }
        self.created = Some(vec![]);
        true
    }

    pub(crate) fn end_create(&mut self) {
        self.created = None;
    }

    pub(crate) fn mark_created(&mut self, table: &str) {
        if let Some(created) = &mut self.created {
            created.push(table.to_string());
        }
    }

    pub(crate) fn is_created(&self, table: &str) -> bool {
        self.created
            .as_ref()
            .is_some_and(|created| created.iter().any(|name| name == table))
    }

    /// Marks the start of a load. Returns `false` if an enclosing load is
    /// already in progress.
    pub(crate) fn begin_load(&mut self) -> bool {
        !std::mem::replace(&mut self.loading, true)
    }

    /// Ends the outermost load and trims the caches that outgrew their
    /// capacity during it.
    pub(crate) fn end_load(&mut self) {
        self.loading = false;

        for mapping in std::mem::take(&mut self.overfull) {
            mapping.trim_cache();
        }
    }

    pub(crate) fn trim_later(&mut self, mapping: Rc<dyn Mapping>) {
        if !self
            .overfull
            .iter()
            .any(|overfull| overfull.table() == mapping.table())
        {
            self.overfull.push(mapping);
        }
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("registry", &self.registry)
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}
