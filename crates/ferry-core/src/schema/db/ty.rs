use crate::{driver, stmt, Error, Result};

/// Database-level storage types, as they appear in `CREATE TABLE` statements.
///
/// A field carries an application type ([`stmt::Type`]); the storage type of
/// its column is derived with [`Type::from_app`] unless the field supplies an
/// explicit hint.
///
/// ```text
/// stmt::Type::Bool    →  db::Type::Boolean
/// stmt::Type::I8      →  db::Type::Integer(1)
/// stmt::Type::I64     →  db::Type::Integer(8)
/// stmt::Type::Char    →  db::Type::Char(1)
/// stmt::Type::String  →  db::Type::VarChar(255)  (unique columns)
///                     →  db::Type::Text          (everything else)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// Single precision floating point
    Float,

    /// Double precision floating point
    Double,

    /// Fixed-length character type of `n` characters
    Char(u8),

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// A civil date and time
    DateTime,

    /// User-specified type, emitted verbatim
    Custom(String),
}

impl Type {
    /// Length of the `VARCHAR` used for unique text columns. Large text types
    /// cannot be indexed by every database.
    pub const UNIQUE_VARCHAR_LEN: u64 = 255;

    /// Maps an application-level type to a database-level storage type.
    pub fn from_app(
        ty: &stmt::Type,
        unique: bool,
        hint: Option<&Type>,
        db: &driver::StorageTypes,
    ) -> Result<Type> {
        let storage_ty = match hint {
            Some(ty) => ty.clone(),
            None => match ty {
                stmt::Type::Bool => Type::Boolean,
                stmt::Type::I8 => Type::Integer(1),
                stmt::Type::I16 => Type::Integer(2),
                stmt::Type::I32 => Type::Integer(4),
                stmt::Type::I64 => Type::Integer(8),
                stmt::Type::F32 => Type::Float,
                stmt::Type::F64 => Type::Double,
                stmt::Type::Char => Type::Char(1),
                stmt::Type::DateTime => Type::DateTime,
                // Caller-defined types are stored as text.
                stmt::Type::String | stmt::Type::Other(_) if unique => {
                    Type::VarChar(Self::UNIQUE_VARCHAR_LEN)
                }
                stmt::Type::String | stmt::Type::Other(_) => db.default_string_type.clone(),
                stmt::Type::Null => {
                    return Err(Error::unsupported_type(ty, "a column cannot be of type null"))
                }
            },
        };

        storage_ty.verify(db)?;
        Ok(storage_ty)
    }

    fn verify(&self, db: &driver::StorageTypes) -> Result<()> {
        match *self {
            Type::VarChar(size) => match db.varchar {
                Some(max) if size > max => Err(Error::unsupported_feature(format!(
                    "VARCHAR({}) exceeds database maximum of {}",
                    size, max
                ))),
                None => Err(Error::unsupported_feature(
                    "VARCHAR type is not supported by this database",
                )),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }
}
