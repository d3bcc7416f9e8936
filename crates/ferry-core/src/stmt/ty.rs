use super::{value_chrono::parse_date_time, Value};
use crate::{Error, Result};

/// The scalar type of a mapped field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// Single precision float
    F32,

    /// Double precision float
    F64,

    /// A single character
    Char,

    /// String type
    String,

    /// Date and time without a time zone
    DateTime,

    /// A caller-defined type, carried as text. The name is used in error
    /// messages only.
    Other(&'static str),

    /// The null type. Nothing converts to it.
    Null,
}

macro_rules! narrow {
    ($value:expr, $variant:ident, $ty:ty) => {{
        let value = $value;
        match value.as_i64().map(<$ty>::try_from) {
            Some(Ok(v)) => Ok(Value::$variant(v)),
            _ => Err(Error::type_conversion(value, stringify!($ty))),
        }
    }};
}

impl Type {
    /// Returns a short, human readable name for the type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Other(name) => *name,
            Self::Null => "null",
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Returns `true` if the value's variant is already of this type. Null is
    /// of every type.
    pub fn is_a(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Self::Other(_), Value::String(_)) => true,
            (ty, value) => *ty == value.infer_ty(),
        }
    }

    /// Converts a loosely typed value, as returned by a driver, into this
    /// type.
    ///
    /// Drivers often hand back wider representations than the column was
    /// declared with: SQLite returns every integer as `i64`, booleans as
    /// integers, and date-times as text.
    pub fn cast(&self, value: Value) -> Result<Value> {
        if value.is_null() || self.is_a(&value) {
            return Ok(value);
        }

        match self {
            Self::Bool => match value.as_i64() {
                Some(v) => Ok(Value::Bool(v != 0)),
                None => Err(Error::type_conversion(value, "bool")),
            },
            Self::I8 => narrow!(value, I8, i8),
            Self::I16 => narrow!(value, I16, i16),
            Self::I32 => narrow!(value, I32, i32),
            Self::I64 => narrow!(value, I64, i64),
            Self::F32 => match value {
                Value::F64(v) => Ok(Value::F32(v as f32)),
                value => match value.as_i64() {
                    Some(v) => Ok(Value::F32(v as f32)),
                    None => Err(Error::type_conversion(value, "f32")),
                },
            },
            Self::F64 => match value {
                Value::F32(v) => Ok(Value::F64(v.into())),
                value => match value.as_i64() {
                    Some(v) => Ok(Value::F64(v as f64)),
                    None => Err(Error::type_conversion(value, "f64")),
                },
            },
            Self::Char => match value {
                Value::String(ref s) => {
                    let mut chars = s.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Ok(Value::Char(c)),
                        _ => Err(Error::type_conversion(value, "char")),
                    }
                }
                _ => Err(Error::type_conversion(value, "char")),
            },
            Self::String => match value {
                Value::Char(c) => Ok(Value::String(c.to_string())),
                _ => Err(Error::type_conversion(value, "String")),
            },
            Self::DateTime => match value.as_str().and_then(parse_date_time) {
                Some(v) => Ok(Value::DateTime(v)),
                None => Err(Error::type_conversion(value, "DateTime")),
            },
            Self::Other(name) => Err(Error::unsupported_type(
                self,
                format!("`{name}` is stored as text; got {:?}", value.infer_ty()),
            )),
            Self::Null => Err(Error::unsupported_type(
                self,
                format!("no conversion from {:?}", value.infer_ty()),
            )),
        }
    }
}
