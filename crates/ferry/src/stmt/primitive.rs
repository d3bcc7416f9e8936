use crate::Result;

use chrono::NaiveDateTime;
use ferry_core::stmt;

/// A scalar Rust type that can be stored in a single column.
pub trait Primitive: Sized {
    const TYPE: stmt::Type;
    const NULLABLE: bool = false;

    fn load(value: stmt::Value) -> Result<Self>;

    fn into_value(self) -> stmt::Value;
}

macro_rules! impl_primitive {
    ( $( $ty:ty => $variant:ident ),* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: stmt::Type = stmt::Type::$variant;

                fn load(value: stmt::Value) -> Result<Self> {
                    value.try_into()
                }

                fn into_value(self) -> stmt::Value {
                    self.into()
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
    NaiveDateTime => DateTime
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: stmt::Type = T::TYPE;
    const NULLABLE: bool = true;

    fn load(value: stmt::Value) -> Result<Self> {
        match value {
            stmt::Value::Null => Ok(None),
            value => Ok(Some(T::load(value)?)),
        }
    }

    fn into_value(self) -> stmt::Value {
        match self {
            Some(value) => value.into_value(),
            None => stmt::Value::Null,
        }
    }
}
