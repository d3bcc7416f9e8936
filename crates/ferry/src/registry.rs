use crate::{Config, Entity, Error, Result, SerDes};

use indexmap::IndexMap;
use std::{
    any::{Any, TypeId},
    cell::RefCell,
    fmt,
    rc::Rc,
};
use tracing::debug;

/// Holds the mapping of every registered entity type.
///
/// Mappings find each other through the registry when resolving foreign
/// fields, so every entity a mapping links to must be registered in the same
/// registry before rows are loaded.
#[derive(Default)]
pub struct Registry {
    config: Config,
    mappings: RefCell<IndexMap<TypeId, Registered>>,
}

struct Registered {
    entity: &'static str,
    serdes: Rc<dyn Any>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn with_config(config: Config) -> Registry {
        Registry {
            config,
            mappings: RefCell::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers the mapping for `T`, replacing any earlier one.
    pub(crate) fn register<T: Entity>(&self, serdes: Rc<SerDes<T>>) {
        let previous = self.mappings.borrow_mut().insert(
            TypeId::of::<T>(),
            Registered {
                entity: T::name(),
                serdes,
            },
        );

        if previous.is_some() {
            debug!(entity = T::name(), "replaced registered mapping");
        }
    }

    /// Returns the mapping registered for `T`.
    pub fn get<T: Entity>(&self) -> Result<Rc<SerDes<T>>> {
        let serdes = self
            .mappings
            .borrow()
            .get(&TypeId::of::<T>())
            .map(|registered| registered.serdes.clone())
            .ok_or_else(|| Error::no_mapping_registered(T::name()))?;

        serdes
            .downcast::<SerDes<T>>()
            .map_err(|_| Error::invalid_schema(format!("mapping for `{}` has the wrong type", T::name())))
    }

    pub fn contains<T: Entity>(&self) -> bool {
        self.mappings.borrow().contains_key(&TypeId::of::<T>())
    }

    /// Names of the registered entities, in registration order.
    pub fn entities(&self) -> Vec<&'static str> {
        self.mappings
            .borrow()
            .values()
            .map(|registered| registered.entity)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.mappings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.borrow().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("entities", &self.entities())
            .finish()
    }
}
