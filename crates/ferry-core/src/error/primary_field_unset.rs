use super::Error;

#[derive(Debug)]
pub(super) struct PrimaryFieldUnset {
    entity: Box<str>,
}

impl std::error::Error for PrimaryFieldUnset {}

impl core::fmt::Display for PrimaryFieldUnset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "primary field unset for entity `{}`", self.entity)
    }
}

impl Error {
    /// Creates an error for a mapping built without a primary field.
    pub fn primary_field_unset(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::PrimaryFieldUnset(PrimaryFieldUnset {
            entity: entity.into().into(),
        }))
    }

    pub fn is_primary_field_unset(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PrimaryFieldUnset(_))
    }
}
