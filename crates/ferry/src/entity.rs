use crate::{Registry, Result, SerDes};

use std::{cell::RefCell, rc::Rc};

/// A loaded entity. Instances handed out by a mapping are shared, so two
/// lookups of the same key can be compared with [`Rc::ptr_eq`].
pub type Instance<T> = Rc<RefCell<T>>;

/// An application type mapped to a table.
pub trait Entity: Sized + 'static {
    /// Name used in error messages and when deriving the table name.
    ///
    /// Defaults to the unqualified type name.
    fn name() -> &'static str {
        let name = std::any::type_name::<Self>();
        let name = name.split('<').next().unwrap_or(name);
        name.rsplit("::").next().unwrap_or(name)
    }

    /// Returns the mapping registered for this entity.
    fn serdes(registry: &Registry) -> Result<Rc<SerDes<Self>>> {
        registry.get::<Self>()
    }
}
