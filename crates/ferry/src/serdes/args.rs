use crate::{stmt::Value, Entity, Error, Instance, Primitive, Result};

use std::{any::Any, cell::RefCell, rc::Rc};

pub(crate) enum Arg {
    Value(Value),
    Entity(Option<Rc<dyn Any>>),
}

/// Values of an entity's immutable fields, handed to its constructor in
/// declaration order.
pub struct Args {
    entity: &'static str,
    args: std::vec::IntoIter<Arg>,
    len: usize,
    position: usize,
}

impl Args {
    pub(crate) fn new(entity: &'static str, args: Vec<Arg>) -> Args {
        Args {
            entity,
            len: args.len(),
            args: args.into_iter(),
            position: 0,
        }
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> usize {
        self.len - self.position
    }

    /// Takes the next value, which must belong to a plain field of type `V`.
    pub fn next<V: Primitive>(&mut self) -> Result<V> {
        let position = self.position;
        match self.advance()? {
            Arg::Value(value) => V::load(value).map_err(|err| {
                err.context(Error::no_such_constructor(
                    self.entity,
                    format!("argument {position} is not a {}", V::TYPE.name()),
                ))
            }),
            Arg::Entity(_) => Err(Error::no_such_constructor(
                self.entity,
                format!("argument {position} is an entity, not a {}", V::TYPE.name()),
            )),
        }
    }

    /// Takes the next value, which must belong to a foreign field linking to
    /// an `F`.
    pub fn next_entity<F: Entity>(&mut self) -> Result<Option<Instance<F>>> {
        let position = self.position;
        match self.advance()? {
            Arg::Entity(None) => Ok(None),
            Arg::Entity(Some(linked)) => linked.downcast::<RefCell<F>>().map(Some).map_err(|_| {
                Error::no_such_constructor(
                    self.entity,
                    format!("argument {position} is not a `{}`", F::name()),
                )
            }),
            Arg::Value(value) => Err(Error::no_such_constructor(
                self.entity,
                format!(
                    "argument {position} is a {}, not a `{}`",
                    value.infer_ty().name(),
                    F::name()
                ),
            )),
        }
    }

    fn advance(&mut self) -> Result<Arg> {
        let Some(arg) = self.args.next() else {
            return Err(Error::no_such_constructor(
                self.entity,
                format!("constructor takes more than {} arguments", self.len),
            ));
        };

        self.position += 1;
        Ok(arg)
    }

    /// Fails unless the constructor consumed every value.
    pub(crate) fn finish(&self) -> Result<()> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(Error::no_such_constructor(
                self.entity,
                format!(
                    "constructor takes {} of {} arguments",
                    self.position, self.len
                ),
            ))
        }
    }
}
