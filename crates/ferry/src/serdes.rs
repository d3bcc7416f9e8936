mod args;
pub use args::Args;
pub(crate) use args::Arg;

mod builder;
pub use builder::Builder;

mod cache;
use cache::Cache;

mod create_table;

mod deserialize;

mod pending;
pub(crate) use pending::Pending;

mod phase;
use phase::{Phase, Stage};

mod serialize;

use crate::{stmt::Value, Db, Entity, Field, Instance, Result};

use std::{any::Any, cell::RefCell, collections::VecDeque, fmt, rc::Rc};
use tracing::trace;

/// Builds an entity from the values of its immutable fields.
pub(crate) type Constructor<T> = Box<dyn Fn(&mut Args) -> Result<T>>;

/// The mapping between an entity type and its table.
///
/// A `SerDes` loads rows into shared [`Instance`]s, writes entities back as
/// inserts or updates, and declares the table. Loaded instances are kept in a
/// bounded cache keyed by primary key, so loading the same key twice yields
/// the same instance while it stays cached.
pub struct SerDes<T: Entity> {
    table: String,
    primary: Rc<Field<T>>,
    fields: Vec<Rc<Field<T>>>,
    constructor: Constructor<T>,
    state: RefCell<State<T>>,
}

struct State<T> {
    deserialize: Phase,
    create_table: Phase,
    cache: Cache<T>,

    /// Foreign links of other entities waiting for an instance of this
    /// entity to finish loading.
    pending: VecDeque<Box<dyn Pending>>,

    /// Primary keys whose immutable values are being resolved.
    constructing: Vec<Value>,
}

/// The parts of a mapping other mappings use without knowing its entity
/// type.
pub(crate) trait Mapping {
    fn table(&self) -> &str;

    fn is_deserializing(&self) -> bool;

    fn is_creating_table(&self) -> bool;

    fn create_table(&self, db: &mut Db) -> Result<()>;

    /// Queues a foreign link to be resolved once the current load of this
    /// entity completes.
    fn defer(&self, pending: Box<dyn Pending>);

    /// Drops queued links belonging to `entity`.
    fn discard(&self, entity: &Rc<dyn Any>);

    /// Evicts cached instances until the cache is within its capacity.
    fn trim_cache(&self);
}

impl<T: Entity> SerDes<T> {
    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    pub fn entity_name(&self) -> &'static str {
        T::name()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_field(&self) -> &Rc<Field<T>> {
        &self.primary
    }

    /// Every field, in declaration order.
    pub fn fields(&self) -> &[Rc<Field<T>>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Rc<Field<T>>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Fields passed to the constructor, in declaration order.
    pub fn immutable_fields(&self) -> impl Iterator<Item = &Rc<Field<T>>> + '_ {
        self.fields.iter().filter(|field| !field.is_mutable())
    }

    pub fn mutable_fields(&self) -> impl Iterator<Item = &Rc<Field<T>>> + '_ {
        self.fields.iter().filter(|field| field.is_mutable())
    }

    pub fn foreign_fields(&self) -> impl Iterator<Item = &Rc<Field<T>>> + '_ {
        self.fields.iter().filter(|field| field.is_foreign())
    }

    pub fn is_deserializing(&self) -> bool {
        self.state.borrow().deserialize.is_active()
    }

    pub fn is_creating_table(&self) -> bool {
        self.state.borrow().create_table.is_active()
    }

    /// Returns the cached instance for `key`, marking it recently used.
    pub fn cached(&self, key: &Value) -> Option<Instance<T>> {
        self.state.borrow_mut().cache.get(key)
    }

    pub fn cached_len(&self) -> usize {
        self.state.borrow().cache.len()
    }

    pub fn evict(&self, key: &Value) -> Option<Instance<T>> {
        self.state.borrow_mut().cache.remove(key)
    }

    pub fn clear_cache(&self) {
        self.state.borrow_mut().cache.clear();
    }

    /// Formats an entity as `Name{field=value, ...}`.
    pub fn describe(&self, entity: &T) -> String {
        let fields = self
            .fields
            .iter()
            .map(|field| format!("{}={}", field.name(), field.get(entity)))
            .collect::<Vec<_>>();

        format!("{}{{{}}}", T::name(), fields.join(", "))
    }

    /// Returns `true` if every field reads the same value from both
    /// entities.
    pub fn fields_eq(&self, lhs: &T, rhs: &T) -> bool {
        self.fields
            .iter()
            .all(|field| field.get(lhs) == field.get(rhs))
    }

    fn enter(&self, stage: Stage) -> phase::Guard<'_, T> {
        self.state.borrow_mut().phase(stage).enter();
        phase::Guard::new(self, stage)
    }
}

impl<T> State<T> {
    fn new(cache_capacity: usize) -> State<T> {
        State {
            deserialize: Phase::Idle,
            create_table: Phase::Idle,
            cache: Cache::new(cache_capacity),
            pending: VecDeque::new(),
            constructing: Vec::new(),
        }
    }

    fn phase(&mut self, stage: Stage) -> &mut Phase {
        match stage {
            Stage::Deserialize => &mut self.deserialize,
            Stage::CreateTable => &mut self.create_table,
        }
    }
}

impl<T: Entity> Mapping for SerDes<T> {
    fn table(&self) -> &str {
        &self.table
    }

    fn is_deserializing(&self) -> bool {
        SerDes::is_deserializing(self)
    }

    fn is_creating_table(&self) -> bool {
        SerDes::is_creating_table(self)
    }

    fn create_table(&self, db: &mut Db) -> Result<()> {
        SerDes::create_table(self, db)
    }

    fn defer(&self, pending: Box<dyn Pending>) {
        self.state.borrow_mut().pending.push_back(pending);
    }

    fn discard(&self, entity: &Rc<dyn Any>) {
        self.state
            .borrow_mut()
            .pending
            .retain(|pending| !pending.is_for(entity));
    }

    fn trim_cache(&self) {
        let evicted = self.state.borrow_mut().cache.trim();
        if !evicted.is_empty() {
            trace!(entity = T::name(), evicted = evicted.len(), "trimmed cache");
        }
    }
}

impl<T: Entity> fmt::Debug for SerDes<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerDes")
            .field("entity", &T::name())
            .field("table", &self.table)
            .field("fields", &self.fields)
            .finish()
    }
}
