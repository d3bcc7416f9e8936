use super::{Args, Constructor, SerDes, State};
use crate::{field, Entity, Error, Field, Registry, Result};

use indexmap::IndexMap;
use std::{cell::RefCell, rc::Rc};
use tracing::debug;

/// Collects the fields of an entity and registers the resulting [`SerDes`].
pub struct Builder<T: Entity> {
    table: Option<String>,
    primary: Option<Rc<Field<T>>>,
    fields: IndexMap<field::Identity, Rc<Field<T>>>,
    constructor: Option<Constructor<T>>,
    cache_capacity: Option<usize>,

    /// First misuse seen while chaining, reported by `build`.
    error: Option<Error>,
}

impl<T: Entity> Builder<T> {
    pub fn new() -> Builder<T> {
        Builder {
            table: None,
            primary: None,
            fields: IndexMap::new(),
            constructor: None,
            cache_capacity: None,
            error: None,
        }
    }

    /// Overrides the derived table name.
    pub fn table(mut self, name: impl Into<String>) -> Builder<T> {
        self.table = Some(name.into());
        self
    }

    /// Sets the primary field. It is also added to the field list at its
    /// position in the chain.
    pub fn primary(mut self, field: impl Into<Rc<Field<T>>>) -> Builder<T> {
        let field = field.into();

        if !field.is_primary_key() {
            self.fail(Error::invalid_schema(format!(
                "`{}.{}` is not a primary field",
                T::name(),
                field.name()
            )));
            return self;
        }

        if let Some(primary) = &self.primary {
            if primary.identity() != field.identity() {
                self.fail(Error::invalid_schema(format!(
                    "entity `{}` has two primary fields: `{}` and `{}`",
                    T::name(),
                    primary.name(),
                    field.name()
                )));
            }
            return self;
        }

        self.primary = Some(field.clone());
        self.fields.entry(field.identity()).or_insert(field);
        self
    }

    /// Adds a field. Adding the same field twice keeps the first.
    pub fn field(mut self, field: impl Into<Rc<Field<T>>>) -> Builder<T> {
        let field = field.into();

        if field.is_primary_key() {
            return self.primary(field);
        }

        self.fields.entry(field.identity()).or_insert(field);
        self
    }

    /// Sets the function that builds an entity from its immutable values.
    pub fn constructor(mut self, f: impl Fn(&mut Args) -> Result<T> + 'static) -> Builder<T> {
        self.constructor = Some(Box::new(f));
        self
    }

    /// Overrides the registry's cache capacity for this entity.
    pub fn cache_capacity(mut self, capacity: usize) -> Builder<T> {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Validates the mapping and registers it, replacing any mapping
    /// previously registered for `T`. Nothing is registered on failure.
    pub fn build(self, registry: &Registry) -> Result<Rc<SerDes<T>>> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let primary = self
            .primary
            .ok_or_else(|| Error::primary_field_unset(T::name()))?;

        let constructor = self
            .constructor
            .ok_or_else(|| Error::no_such_constructor(T::name(), "none was supplied"))?;

        let table = self
            .table
            .unwrap_or_else(|| registry.config().table_name(T::name()));

        let cache_capacity = self
            .cache_capacity
            .unwrap_or(registry.config().cache_capacity);

        let fields = self.fields.into_values().collect::<Vec<_>>();

        debug!(
            entity = T::name(),
            table = %table,
            fields = fields.len(),
            "registering mapping"
        );

        let serdes = Rc::new(SerDes {
            table,
            primary,
            fields,
            constructor,
            state: RefCell::new(State::new(cache_capacity)),
        });

        registry.register(serdes.clone());
        Ok(serdes)
    }

    fn fail(&mut self, err: Error) {
        self.error.get_or_insert(err);
    }
}

impl<T: Entity> Default for Builder<T> {
    fn default() -> Self {
        Builder::new()
    }
}
