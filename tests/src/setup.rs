use crate::{ExecLog, LoggingDriver};
use ferry::{
    sqlite::{Connection, Sqlite},
    Db, Entity, Registry, SerDes,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// An in-memory SQLite database with every operation logged.
pub struct Test {
    db: Db,
    log: ExecLog,
}

impl Test {
    pub fn new(registry: Registry) -> Test {
        Test::with_connection(registry, open())
    }

    /// Like [`Test::new`], but rows may reference keys that do not exist.
    pub fn without_foreign_keys(registry: Registry) -> Test {
        let connection = open();
        connection
            .set_foreign_keys(false)
            .expect("failed to disable foreign keys");

        Test::with_connection(registry, connection)
    }

    fn with_connection(registry: Registry, connection: Connection) -> Test {
        init_tracing();

        let driver = LoggingDriver::new(Box::new(connection));
        let log = ExecLog::new(driver.ops_log_handle());

        Test {
            db: Db::new(registry, driver),
            log,
        }
    }

    pub fn db(&mut self) -> &mut Db {
        &mut self.db
    }

    pub fn log(&mut self) -> &mut ExecLog {
        &mut self.log
    }

    pub fn serdes<T: Entity>(&self) -> Rc<SerDes<T>> {
        self.db
            .registry()
            .get::<T>()
            .expect("entity is not registered")
    }
}

fn open() -> Connection {
    Sqlite::in_memory()
        .connect()
        .expect("failed to open in-memory database")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
