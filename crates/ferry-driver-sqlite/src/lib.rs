mod value;
pub(crate) use value::Value;

use ferry_core::{
    driver::{operation, Capability, Driver, Operation, Response},
    schema::db::{ColumnDef, ForeignKey},
    stmt::{self, Row},
    Error, Result,
};
use ferry_sql::{
    self as sql,
    stmt::{Name, Projection, Select},
};
use indexmap::IndexMap;
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Where a SQLite database lives.
#[derive(Debug, Clone)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL, such as
    /// `sqlite::memory:` or `sqlite:/var/lib/app/data.db`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> String {
        match self {
            Sqlite::InMemory => "sqlite::memory:".to_string(),
            Sqlite::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    /// Opens a connection. Every in-memory connection is a fresh database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

/// Definition of a table created through this connection, kept so the table
/// can be rebuilt when a foreign key is added.
#[derive(Debug, Clone)]
struct TableDef {
    primary_key: String,
    columns: Vec<ColumnDef>,
    foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
    tables: IndexMap<String, TableDef>,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self::from_rusqlite(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self::from_rusqlite(connection))
    }

    fn from_rusqlite(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            tables: IndexMap::new(),
        }
    }

    fn query(&self, stmt: &sql::Statement) -> Result<Vec<Row>> {
        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = sql::Serializer::sqlite().serialize(stmt, &mut params);
        debug!(sql = %sql_str, params = params.len(), "query");

        let mut stmt = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(Error::driver)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut item = Row::new();

            for (index, column) in columns.iter().enumerate() {
                item.insert(column.clone(), Value::from_sql(row, index)?.into_inner());
            }

            ret.push(item);
        }

        Ok(ret)
    }

    fn execute(&self, stmt: &sql::Statement) -> Result<u64> {
        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = sql::Serializer::sqlite().serialize(stmt, &mut params);
        debug!(sql = %sql_str, params = params.len(), "execute");

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let count = self
            .connection
            .prepare_cached(&sql_str)
            .and_then(|mut stmt| stmt.execute(rusqlite::params_from_iter(params.iter())))
            .map_err(Error::driver)?;

        Ok(count as u64)
    }

    fn create_table(&mut self, op: operation::CreateTable) -> Result<Response> {
        self.execute(&sql::Statement::create_table(
            &op.table,
            &op.primary_key,
            op.columns.clone(),
        ))?;

        self.tables.insert(
            op.table,
            TableDef {
                primary_key: op.primary_key,
                columns: op.columns,
                foreign_keys: vec![],
            },
        );

        Ok(Response::count(0))
    }

    /// SQLite cannot add a constraint to an existing table, so the table is
    /// rebuilt with the constraint declared inline and its rows copied over.
    fn add_foreign_key(&mut self, foreign_key: ForeignKey) -> Result<Response> {
        let Some(def) = self.tables.get(&foreign_key.table) else {
            return Err(Error::invalid_schema(format!(
                "cannot add foreign key to `{}`; the table was not created by this connection",
                foreign_key.table
            )));
        };

        let mut def = def.clone();
        def.foreign_keys.push(foreign_key.clone());

        let table = &foreign_key.table;
        let rebuild = format!("__ferry_rebuild_{table}");
        let columns = def
            .columns
            .iter()
            .map(|column| (Name::from(&column.name), Name::from(&column.name)))
            .collect();

        let statements = [
            sql::Statement::create_table_with_foreign_keys(
                &rebuild,
                &def.primary_key,
                def.columns.clone(),
                def.foreign_keys.clone(),
            ),
            sql::Statement::copy_table(Name::from(table), Name::from(&rebuild), columns),
            sql::Statement::drop_table(table),
            sql::Statement::rename_table(&rebuild, table),
        ];

        // The pragma is a no-op inside a transaction, so it is toggled around
        // the rebuild.
        let enforced = self.foreign_keys_enforced()?;
        if enforced {
            self.execute(&sql::Statement::pragma_disable_foreign_keys())?;
        }

        let rebuilt = self.rebuild(&statements);

        if enforced {
            self.execute(&sql::Statement::pragma_enable_foreign_keys())?;
        }

        rebuilt?;
        self.tables.insert(foreign_key.table, def);

        Ok(Response::count(0))
    }

    fn rebuild(&mut self, statements: &[sql::Statement]) -> Result<()> {
        let tx = self.connection.transaction().map_err(Error::driver)?;

        for stmt in statements {
            let mut params: Vec<stmt::Value> = vec![];
            let sql_str = sql::Serializer::sqlite().serialize(stmt, &mut params);
            debug!(sql = %sql_str, "rebuild");

            tx.execute(&sql_str, []).map_err(Error::driver)?;
        }

        tx.commit().map_err(Error::driver)
    }

    /// Turns enforcement of foreign-key constraints on or off for this
    /// connection.
    pub fn set_foreign_keys(&self, enabled: bool) -> Result<()> {
        let pragma = if enabled {
            sql::Statement::pragma_enable_foreign_keys()
        } else {
            sql::Statement::pragma_disable_foreign_keys()
        };
        self.execute(&pragma)?;
        debug!(enabled, "foreign key enforcement");
        Ok(())
    }

    pub fn foreign_keys_enforced(&self) -> Result<bool> {
        let rows = self.query(&sql::Statement::pragma_query("foreign_keys"))?;

        Ok(rows
            .first()
            .and_then(|row| row.get("foreign_keys"))
            .and_then(stmt::Value::as_i64)
            .is_some_and(|enabled| enabled != 0))
    }

    /// Reads `MAX(column)` back under the plain column name.
    fn max(&self, op: operation::Max) -> Result<Response> {
        let rows = self.query(&sql::Statement::select_max(&op.table, &op.column))?;

        let value = rows
            .into_iter()
            .next()
            .and_then(|row| row.into_values().next())
            .unwrap_or(stmt::Value::Null);

        Ok(Response::values(vec![Row::from_iter([(op.column, value)])]))
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let select = Select {
            projection: Projection::Columns(vec![Name::from("name")]),
            table: Name::from("sqlite_master"),
            filter: vec![
                (Name::from("type"), stmt::Value::from("table")),
                (Name::from("name"), stmt::Value::from(table)),
            ],
            limit: Some(1),
        };

        Ok(!self.query(&select.into())?.is_empty())
    }
}

impl Driver for Connection {
    fn capability(&self) -> &Capability {
        &Capability::SQLITE
    }

    fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::SelectByKey(op) => {
                let rows =
                    self.query(&sql::Statement::select_by_key(op.table, op.key_column, op.key))?;
                Ok(Response::values(rows))
            }
            Operation::ValueExists(op) => {
                let rows =
                    self.query(&sql::Statement::value_exists(op.table, op.column, op.value))?;
                Ok(Response::count(rows.len() as u64))
            }
            Operation::Insert(op) => {
                let count = self.execute(&sql::Statement::insert(op.table, op.columns))?;
                Ok(Response::count(count))
            }
            Operation::Update(op) => {
                let count = self.execute(&sql::Statement::update(
                    op.table,
                    op.key_column,
                    op.key,
                    op.columns,
                ))?;
                Ok(Response::count(count))
            }
            Operation::CreateTable(op) => self.create_table(op),
            Operation::Max(op) => self.max(op),
            Operation::AddForeignKey(op) => self.add_foreign_key(op.foreign_key),
            Operation::TableExists(op) => {
                let exists = self.table_exists(&op.table)?;
                Ok(Response::count(exists as u64))
            }
        }
    }
}
