mod capability;
pub use capability::{Capability, StorageTypes};

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{
    schema::db::{ColumnDef, ForeignKey},
    stmt::{Row, Type, Value},
    Result,
};

use std::fmt::Debug;

/// The storage adapter the mapping engine issues its statements through.
///
/// Calls are synchronous: entity deserialization recurses through the driver
/// on the caller's stack.
pub trait Driver: Debug + 'static {
    /// Describes the driver's capability.
    fn capability(&self) -> &Capability;

    /// Execute a database operation
    fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Reads one column of a fetched row as `ty`.
    ///
    /// Fails with "no such column" when the row lacks the column and with
    /// "unsupported type" when the driver has no conversion into `ty`.
    fn read_column(&self, row: &Row, column: &str, ty: &Type) -> Result<Value> {
        row.read(column, ty)
    }
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn capability(&self) -> &Capability {
        (**self).capability()
    }

    fn exec(&mut self, op: Operation) -> Result<Response> {
        (**self).exec(op)
    }

    fn read_column(&self, row: &Row, column: &str, ty: &Type) -> Result<Value> {
        (**self).read_column(row, column, ty)
    }
}

impl dyn Driver + '_ {
    /// Returns the row whose `key_column` equals `key`, if any.
    pub fn select_by_key(
        &mut self,
        table: &str,
        key_column: &str,
        key: &Value,
    ) -> Result<Option<Row>> {
        let response = self.exec(
            operation::SelectByKey {
                table: table.to_string(),
                key_column: key_column.to_string(),
                key: key.clone(),
            }
            .into(),
        )?;

        Ok(response.rows.into_values()?.into_iter().next())
    }

    /// Returns `true` if any row of `table` holds `value` in `column`.
    pub fn value_exists(&mut self, table: &str, column: &str, value: &Value) -> Result<bool> {
        let response = self.exec(
            operation::ValueExists {
                table: table.to_string(),
                column: column.to_string(),
                value: value.clone(),
            }
            .into(),
        )?;

        Ok(response.rows.into_count()? > 0)
    }

    pub fn insert(&mut self, table: &str, columns: Vec<(String, Value)>) -> Result<()> {
        self.exec(
            operation::Insert {
                table: table.to_string(),
                columns,
            }
            .into(),
        )?
        .rows
        .into_count()?;
        Ok(())
    }

    /// Updates the row identified by `key`, returning the number of rows
    /// changed.
    pub fn update(
        &mut self,
        table: &str,
        key_column: &str,
        key: &Value,
        columns: Vec<(String, Value)>,
    ) -> Result<u64> {
        self.exec(
            operation::Update {
                table: table.to_string(),
                key_column: key_column.to_string(),
                key: key.clone(),
                columns,
            }
            .into(),
        )?
        .rows
        .into_count()
    }

    pub fn create_table(
        &mut self,
        table: &str,
        primary_key: &str,
        columns: Vec<ColumnDef>,
    ) -> Result<()> {
        self.exec(
            operation::CreateTable {
                table: table.to_string(),
                primary_key: primary_key.to_string(),
                columns,
            }
            .into(),
        )?;
        Ok(())
    }

    pub fn add_foreign_key_constraint(
        &mut self,
        table: &str,
        column: &str,
        references_table: &str,
        references_column: &str,
    ) -> Result<()> {
        let foreign_key = ForeignKey {
            table: table.to_string(),
            column: column.to_string(),
            references_table: references_table.to_string(),
            references_column: references_column.to_string(),
        };
        self.exec(operation::AddForeignKey { foreign_key }.into())?;
        Ok(())
    }

    /// Returns the largest value of `column` read as `ty`, or `None` when
    /// the table holds no rows.
    pub fn max(&mut self, table: &str, column: &str, ty: &Type) -> Result<Option<Value>> {
        let response = self.exec(
            operation::Max {
                table: table.to_string(),
                column: column.to_string(),
            }
            .into(),
        )?;

        let Some(row) = response.rows.into_values()?.into_iter().next() else {
            return Ok(None);
        };

        match self.read_column(&row, column, ty)? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    pub fn table_exists(&mut self, table: &str) -> Result<bool> {
        let response = self.exec(
            operation::TableExists {
                table: table.to_string(),
            }
            .into(),
        )?;

        Ok(response.rows.into_count()? > 0)
    }
}
