use super::Error;

/// Error when immutable foreign fields form a cycle.
///
/// An entity whose constructor needs another entity, which in turn needs
/// the first one to be constructed, can never be built.
#[derive(Debug)]
pub(super) struct CyclicReference {
    entity: Box<str>,
    key: Box<str>,
}

impl std::error::Error for CyclicReference {}

impl core::fmt::Display for CyclicReference {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cyclic reference: `{}` with key {} requires itself to be constructed",
            self.entity, self.key
        )
    }
}

impl Error {
    pub fn cyclic_reference(entity: impl Into<String>, key: impl core::fmt::Debug) -> Error {
        Error::from(super::ErrorKind::CyclicReference(CyclicReference {
            entity: entity.into().into(),
            key: format!("{key:?}").into(),
        }))
    }

    pub fn is_cyclic_reference(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CyclicReference(_))
    }
}
