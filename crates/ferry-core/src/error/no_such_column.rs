use super::Error;

/// Error when a fetched row lacks a column a field expects.
///
/// Indicates the table does not match the mapping that reads it.
#[derive(Debug)]
pub(super) struct NoSuchColumn {
    column: Box<str>,
}

impl std::error::Error for NoSuchColumn {}

impl core::fmt::Display for NoSuchColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no such column: {}", self.column)
    }
}

impl Error {
    pub fn no_such_column(column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoSuchColumn(NoSuchColumn {
            column: column.into().into(),
        }))
    }

    pub fn is_no_such_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoSuchColumn(_))
    }
}
