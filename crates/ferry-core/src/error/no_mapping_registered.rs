use super::Error;

/// Error when an entity type has no mapping in the registry.
///
/// Foreign fields locate the mapping of the entity they reference through
/// the registry; if that mapping was never built, resolution cannot proceed.
#[derive(Debug)]
pub(super) struct NoMappingRegistered {
    entity: Box<str>,
}

impl std::error::Error for NoMappingRegistered {}

impl core::fmt::Display for NoMappingRegistered {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no mapping registered for entity `{}`", self.entity)
    }
}

impl Error {
    /// Creates a no mapping registered error.
    pub fn no_mapping_registered(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoMappingRegistered(NoMappingRegistered {
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is a no mapping registered error.
    pub fn is_no_mapping_registered(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoMappingRegistered(_))
    }
}
