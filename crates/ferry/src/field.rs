mod foreign;
pub(crate) use foreign::Link;

use crate::{
    schema::db,
    stmt::{Primitive, Type, Value},
    Db, Entity, Error, Instance, Result,
};
use ferry_core::driver::StorageTypes;

use std::{any::TypeId, fmt, rc::Rc};

/// Describes how one property of an entity maps to a column.
///
/// A field is either a plain column holding a [`Primitive`] value, or a
/// foreign column holding the key of another entity. Either kind may be
/// mutable, in which case the mapping assigns it after construction and
/// includes it in updates. Immutable fields are handed to the entity's
/// constructor in declaration order.
pub struct Field<P> {
    name: String,
    ty: Type,
    unique: bool,
    nullable: bool,
    primary_key: bool,
    storage_ty: Option<db::Type>,
    kind: Kind<P>,
}

enum Kind<P> {
    Primitive {
        get: Box<dyn Fn(&P) -> Value>,
        set: Option<Box<dyn Fn(&mut P, Value) -> Result<()>>>,
    },
    Foreign(Box<dyn Link<P>>),
}

/// Two fields with the same identity are the same field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub name: String,
    pub parent: TypeId,
    pub ty: Type,
    pub unique: bool,
}

impl<P: Entity> Field<P> {
    /// The field that identifies an entity. Primary fields are unique and
    /// immutable.
    pub fn primary<V: Primitive>(
        name: impl Into<String>,
        get: impl Fn(&P) -> V + 'static,
    ) -> Field<P> {
        let mut field = Field::immutable(name, get);
        field.unique = true;
        field.nullable = false;
        field.primary_key = true;
        field
    }

    pub fn immutable<V: Primitive>(
        name: impl Into<String>,
        get: impl Fn(&P) -> V + 'static,
    ) -> Field<P> {
        Field::new(
            name,
            V::TYPE,
            V::NULLABLE,
            Kind::Primitive {
                get: Box::new(move |entity| get(entity).into_value()),
                set: None,
            },
        )
    }

    pub fn mutable<V: Primitive>(
        name: impl Into<String>,
        get: impl Fn(&P) -> V + 'static,
        set: impl Fn(&mut P, V) + 'static,
    ) -> Field<P> {
        Field::new(
            name,
            V::TYPE,
            V::NULLABLE,
            Kind::Primitive {
                get: Box::new(move |entity| get(entity).into_value()),
                set: Some(Box::new(move |entity, value| {
                    set(entity, V::load(value)?);
                    Ok(())
                })),
            },
        )
    }

    /// A column holding the value of `referenced` for a linked `F`.
    pub fn foreign<F: Entity>(
        name: impl Into<String>,
        referenced: Rc<Field<F>>,
        get: impl Fn(&P) -> Option<Instance<F>> + 'static,
    ) -> Field<P> {
        let ty = referenced.ty.clone();
        Field::new(
            name,
            ty,
            true,
            Kind::Foreign(Box::new(foreign::ForeignLink::new(referenced, get, None))),
        )
    }

    pub fn mutable_foreign<F: Entity>(
        name: impl Into<String>,
        referenced: Rc<Field<F>>,
        get: impl Fn(&P) -> Option<Instance<F>> + 'static,
        set: impl Fn(&mut P, Option<Instance<F>>) + 'static,
    ) -> Field<P> {
        let ty = referenced.ty.clone();
        let set: Box<dyn Fn(&mut P, Option<Instance<F>>)> = Box::new(set);
        Field::new(
            name,
            ty,
            true,
            Kind::Foreign(Box::new(foreign::ForeignLink::new(
                referenced,
                get,
                Some(set),
            ))),
        )
    }

    fn new(name: impl Into<String>, ty: Type, nullable: bool, kind: Kind<P>) -> Field<P> {
        Field {
            name: name.into(),
            ty,
            unique: false,
            nullable,
            primary_key: false,
            storage_ty: None,
            kind,
        }
    }

    pub fn unique(mut self) -> Field<P> {
        self.unique = true;
        self
    }

    pub fn nullable(mut self) -> Field<P> {
        self.nullable = true;
        self
    }

    pub fn not_null(mut self) -> Field<P> {
        self.nullable = false;
        self
    }

    /// Overrides the storage type the column is declared with.
    pub fn storage_ty(mut self, ty: db::Type) -> Field<P> {
        self.storage_ty = Some(ty);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self.kind, Kind::Foreign(_))
    }

    /// Returns `true` if the field can be assigned after construction.
    pub fn is_mutable(&self) -> bool {
        match &self.kind {
            Kind::Primitive { set, .. } => set.is_some(),
            Kind::Foreign(link) => link.is_mutable(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            parent: TypeId::of::<P>(),
            ty: self.ty.clone(),
            unique: self.unique,
        }
    }

    /// Reads the column value from an entity. Foreign fields yield the key
    /// of the linked entity, or null when nothing is linked.
    pub fn get(&self, entity: &P) -> Value {
        match &self.kind {
            Kind::Primitive { get, .. } => get(entity),
            Kind::Foreign(link) => link.key_of(entity),
        }
    }

    /// Assigns a column value to a plain mutable field.
    ///
    /// Foreign fields are assigned by key with [`Field::set_from_key`].
    pub fn set(&self, entity: &mut P, value: Value) -> Result<()> {
        match &self.kind {
            Kind::Primitive { set: Some(set), .. } => set(entity, value),
            _ => Err(Error::unsupported_mutation(P::name(), &self.name)),
        }
    }

    /// Resolves `key` to the linked entity and assigns it. A null key clears
    /// the link.
    pub fn set_from_key(&self, db: &mut Db, entity: &Instance<P>, key: &Value) -> Result<()> {
        let link = self.mutable_link()?;
        let linked = if key.is_null() {
            None
        } else {
            Some(link.resolve(db, key)?)
        };
        link.assign(&mut entity.borrow_mut(), linked)
    }

    /// Like [`Field::set_from_key`], but links `completed` directly when it
    /// is the entity `key` refers to.
    pub(crate) fn set_from_completed(
        &self,
        db: &mut Db,
        entity: &Instance<P>,
        key: &Value,
        completed: &Rc<dyn std::any::Any>,
    ) -> Result<()> {
        let link = self.mutable_link()?;
        match link.adopt(completed, key) {
            Some(linked) => link.assign(&mut entity.borrow_mut(), Some(linked)),
            None => self.set_from_key(db, entity, key),
        }
    }

    /// Returns the entity linked by a foreign field.
    pub fn referenced_entity<F: Entity>(&self, entity: &P) -> Option<Instance<F>> {
        let link = self.link()?;
        link.entity(entity)?.downcast::<std::cell::RefCell<F>>().ok()
    }

    /// Name of the column a foreign field references.
    pub fn referenced_name(&self) -> Option<&str> {
        self.link().map(|link| link.referenced_name())
    }

    /// Name of the entity a foreign field links to.
    pub fn referenced_entity_name(&self) -> Option<&'static str> {
        self.link().map(|link| link.target_name())
    }

    /// Loads the entity a foreign field links to by its key.
    pub fn resolve<F: Entity>(&self, db: &mut Db, key: &Value) -> Result<Instance<F>> {
        let Some(link) = self.link() else {
            return Err(Error::invalid_schema(format!(
                "`{}.{}` is not a foreign field",
                P::name(),
                self.name
            )));
        };

        link.resolve(db, key)?
            .downcast::<std::cell::RefCell<F>>()
            .map_err(|_| {
                Error::invalid_schema(format!(
                    "`{}.{}` links to `{}`, not `{}`",
                    P::name(),
                    self.name,
                    link.target_name(),
                    F::name()
                ))
            })
    }

    /// The storage type of the column on a database with `storage` types.
    pub fn sql_type(&self, storage: &StorageTypes) -> Result<db::Type> {
        db::Type::from_app(&self.ty, self.unique, self.storage_ty.as_ref(), storage)
    }

    pub fn column_def(&self, storage: &StorageTypes) -> Result<db::ColumnDef> {
        Ok(db::ColumnDef {
            name: self.name.clone(),
            ty: self.sql_type(storage)?,
            unique: self.unique,
            nullable: self.nullable,
        })
    }

    pub(crate) fn link(&self) -> Option<&dyn Link<P>> {
        match &self.kind {
            Kind::Foreign(link) => Some(&**link),
            Kind::Primitive { .. } => None,
        }
    }

    fn mutable_link(&self) -> Result<&dyn Link<P>> {
        match self.link() {
            Some(link) if link.is_mutable() => Ok(link),
            _ => Err(Error::unsupported_mutation(P::name(), &self.name)),
        }
    }
}

impl<P: Entity> PartialEq for Field<P> {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl<P: Entity> fmt::Debug for Field<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Field");
        s.field("entity", &P::name())
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("unique", &self.unique)
            .field("nullable", &self.nullable)
            .field("mutable", &self.is_mutable());

        if let Some(link) = self.link() {
            s.field("references", &(link.target_name(), link.referenced_name()));
        }

        s.finish()
    }
}
