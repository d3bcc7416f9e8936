use super::Field;
use crate::{err, serdes::Mapping, stmt::Value, Db, Entity, Instance, Registry, Result};

use std::{any::Any, cell::RefCell, rc::Rc};

/// The type-erased side of a foreign field.
///
/// Linked entities cross this boundary as `Rc<dyn Any>` wrapping an
/// `Instance<F>`.
pub(crate) trait Link<P> {
    fn target_name(&self) -> &'static str;

    fn referenced_name(&self) -> &str;

    fn is_mutable(&self) -> bool;

    /// Value of the referenced field on the linked entity, or null.
    fn key_of(&self, entity: &P) -> Value;

    fn entity(&self, entity: &P) -> Option<Rc<dyn Any>>;

    /// Loads the entity whose referenced field equals `key`.
    fn resolve(&self, db: &mut Db, key: &Value) -> Result<Rc<dyn Any>>;

    /// Returns `completed` if it is the entity `key` refers to.
    fn adopt(&self, completed: &Rc<dyn Any>, key: &Value) -> Option<Rc<dyn Any>>;

    fn assign(&self, entity: &mut P, linked: Option<Rc<dyn Any>>) -> Result<()>;

    fn target(&self, registry: &Registry) -> Result<Rc<dyn Mapping>>;
}

pub(super) struct ForeignLink<P, F: Entity> {
    referenced: Rc<Field<F>>,
    get: Box<dyn Fn(&P) -> Option<Instance<F>>>,
    set: Option<Box<dyn Fn(&mut P, Option<Instance<F>>)>>,
}

impl<P: Entity, F: Entity> ForeignLink<P, F> {
    pub(super) fn new(
        referenced: Rc<Field<F>>,
        get: impl Fn(&P) -> Option<Instance<F>> + 'static,
        set: Option<Box<dyn Fn(&mut P, Option<Instance<F>>)>>,
    ) -> ForeignLink<P, F> {
        ForeignLink {
            referenced,
            get: Box::new(get),
            set,
        }
    }
}

impl<P: Entity, F: Entity> Link<P> for ForeignLink<P, F> {
    fn target_name(&self) -> &'static str {
        F::name()
    }

    fn referenced_name(&self) -> &str {
        self.referenced.name()
    }

    fn is_mutable(&self) -> bool {
        self.set.is_some()
    }

    fn key_of(&self, entity: &P) -> Value {
        match (self.get)(entity) {
            Some(linked) => self.referenced.get(&linked.borrow()),
            None => Value::Null,
        }
    }

    fn entity(&self, entity: &P) -> Option<Rc<dyn Any>> {
        (self.get)(entity).map(|linked| linked as Rc<dyn Any>)
    }

    fn resolve(&self, db: &mut Db, key: &Value) -> Result<Rc<dyn Any>> {
        let mapping = F::serdes(db.registry())?;
        let linked: Rc<dyn Any> = mapping.find_by(db, &self.referenced, key)?;
        Ok(linked)
    }

    fn adopt(&self, completed: &Rc<dyn Any>, key: &Value) -> Option<Rc<dyn Any>> {
        let linked = completed.clone().downcast::<RefCell<F>>().ok()?;
        let is_match = self.referenced.get(&linked.borrow()) == *key;
        is_match.then_some(linked as Rc<dyn Any>)
    }

    fn assign(&self, entity: &mut P, linked: Option<Rc<dyn Any>>) -> Result<()> {
        let Some(set) = &self.set else {
            return Err(err!(
                "link from `{}` to `{}` is immutable",
                P::name(),
                F::name()
            ));
        };

        let linked = match linked {
            Some(linked) => Some(
                linked
                    .downcast::<RefCell<F>>()
                    .map_err(|_| err!("expected an instance of `{}`", F::name()))?,
            ),
            None => None,
        };

        set(entity, linked);
        Ok(())
    }

    fn target(&self, registry: &Registry) -> Result<Rc<dyn Mapping>> {
        let mapping: Rc<dyn Mapping> = F::serdes(registry)?;
        Ok(mapping)
    }
}
