use chrono::NaiveDateTime;

use crate::{stmt::Value, Error};

/// Text format used when a date-time is stored in a text column.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl TryFrom<Value> for NaiveDateTime {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(value) => Ok(value),
            _ => Err(Error::type_conversion(value, "NaiveDateTime")),
        }
    }
}

/// Parses a date-time stored as text, accepting either a space or `T`
/// between the date and time parts.
pub(crate) fn parse_date_time(src: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(src, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(src, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}
