use super::Error;

/// Error when an entity cannot be constructed from its immutable values.
///
/// This occurs when:
/// - A mapping was built without a constructor
/// - The constructor asks for a value of the wrong kind at some position
/// - The constructor asks for more values than the mapping supplies, or
///   leaves some unconsumed
#[derive(Debug)]
pub(super) struct NoSuchConstructor {
    entity: Box<str>,
    message: Box<str>,
}

impl std::error::Error for NoSuchConstructor {}

impl core::fmt::Display for NoSuchConstructor {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "no such constructor for entity `{}`: {}",
            self.entity, self.message
        )
    }
}

impl Error {
    /// Creates a no such constructor error.
    pub fn no_such_constructor(entity: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoSuchConstructor(NoSuchConstructor {
            entity: entity.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a no such constructor error.
    pub fn is_no_such_constructor(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoSuchConstructor(_))
    }
}
