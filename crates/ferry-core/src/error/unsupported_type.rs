use super::Error;
use crate::stmt::Type;

/// Error when no scalar conversion exists for a field's value type.
#[derive(Debug)]
pub(super) struct UnsupportedType {
    ty: Type,
    message: Box<str>,
}

impl std::error::Error for UnsupportedType {}

impl core::fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported type {:?}: {}", self.ty, self.message)
    }
}

impl Error {
    pub fn unsupported_type(ty: &Type, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedType {
            ty: ty.clone(),
            message: message.into().into(),
        }))
    }

    pub fn is_unsupported_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedType(_))
    }
}
