mod config;
pub use config::Config;

pub mod db;
pub use db::Db;

mod entity;
pub use entity::{Entity, Instance};

pub mod field;
pub use field::Field;

mod registry;
pub use registry::Registry;

pub mod serdes;
pub use serdes::SerDes;

pub mod stmt;
pub use stmt::Primitive;

pub use ferry_core::{bail, driver, err, schema, Error, Result};

#[cfg(feature = "sqlite")]
pub use ferry_driver_sqlite as sqlite;
