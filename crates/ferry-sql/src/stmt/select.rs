use super::{Name, Statement, Value};

/// A single-table select filtered by column equality.
#[derive(Debug, Clone)]
pub struct Select {
    /// What to return for each matching row
    pub projection: Projection,

    /// Table to select from
    pub table: Name,

    /// Column equality conditions, joined with `AND`
    pub filter: Vec<(Name, Value)>,

    /// Maximum number of rows to return
    pub limit: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum Projection {
    /// `*`
    All,

    /// The literal `1`, used for existence checks
    One,

    /// An explicit column list
    Columns(Vec<Name>),

    /// `MAX(column)`
    Max(Name),
}

impl Statement {
    /// Selects every column of the row whose `column` equals `key`.
    pub fn select_by_key(table: impl Into<Name>, column: impl Into<Name>, key: Value) -> Self {
        Select {
            projection: Projection::All,
            table: table.into(),
            filter: vec![(column.into(), key)],
            limit: Some(1),
        }
        .into()
    }

    /// Selects `1` if any row holds `value` in `column`.
    pub fn value_exists(table: impl Into<Name>, column: impl Into<Name>, value: Value) -> Self {
        Select {
            projection: Projection::One,
            table: table.into(),
            filter: vec![(column.into(), value)],
            limit: Some(1),
        }
        .into()
    }

    /// Selects the largest value held in `column`, or `NULL` for an empty
    /// table.
    pub fn select_max(table: impl Into<Name>, column: impl Into<Name>) -> Self {
        Select {
            projection: Projection::Max(column.into()),
            table: table.into(),
            filter: vec![],
            limit: None,
        }
        .into()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
