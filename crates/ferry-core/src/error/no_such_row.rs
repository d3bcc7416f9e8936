use super::Error;

/// Error when a key lookup returns no row.
#[derive(Debug)]
pub(super) struct NoSuchRow {
    context: Option<Box<str>>,
}

impl std::error::Error for NoSuchRow {}

impl core::fmt::Display for NoSuchRow {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no such row")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a no such row error.
    ///
    /// The context describes the lookup, for example `table=users username="bob"`.
    pub fn no_such_row(context: impl Into<String>) -> Error {
        let context = context.into();
        Error::from(super::ErrorKind::NoSuchRow(NoSuchRow {
            context: (!context.is_empty()).then(|| context.into()),
        }))
    }

    /// Returns `true` if this error is a no such row error.
    pub fn is_no_such_row(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoSuchRow(_))
    }
}
