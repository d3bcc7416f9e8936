use super::Error;

/// Error when `set` is called through a descriptor that is not mutable.
///
/// Callers are expected to check `is_mutable()` before setting a value.
#[derive(Debug)]
pub(super) struct UnsupportedMutation {
    entity: Box<str>,
    field: Box<str>,
}

impl std::error::Error for UnsupportedMutation {}

impl core::fmt::Display for UnsupportedMutation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported mutation: `{}.{}` is immutable",
            self.entity, self.field
        )
    }
}

impl Error {
    /// Creates an unsupported mutation error.
    pub fn unsupported_mutation(entity: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedMutation(UnsupportedMutation {
            entity: entity.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported mutation error.
    pub fn is_unsupported_mutation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedMutation(_))
    }
}
