mod primitive;
pub use primitive::Primitive;

pub use ferry_core::stmt::{Row, Type, Value};
