use crate::{stmt::Value, Db, Entity, Field, Instance, Result};

use std::{any::Any, rc::Rc};

/// A foreign link whose assignment waits for another entity to finish
/// loading.
pub(crate) trait Pending {
    /// Assigns the link. `completed` is the instance whose load just
    /// finished and is linked directly when it is the one referenced.
    fn resolve(self: Box<Self>, db: &mut Db, completed: &Rc<dyn Any>) -> Result<()>;

    /// Returns `true` if the link belongs to `entity`.
    fn is_for(&self, entity: &Rc<dyn Any>) -> bool;
}

pub(crate) struct PendingLink<P: Entity> {
    pub(crate) entity: Instance<P>,
    pub(crate) field: Rc<Field<P>>,
    pub(crate) key: Value,
}

impl<P: Entity> Pending for PendingLink<P> {
    fn resolve(self: Box<Self>, db: &mut Db, completed: &Rc<dyn Any>) -> Result<()> {
        self.field
            .set_from_completed(db, &self.entity, &self.key, completed)
    }

    fn is_for(&self, entity: &Rc<dyn Any>) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.entity) as *const (),
            Rc::as_ptr(entity) as *const (),
        )
    }
}
