use crate::schema::db;

#[derive(Debug, Clone)]
pub struct Capability {
    /// Column storage types supported by the database
    pub storage_types: StorageTypes,

    /// SQL: supports `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY`. When
    /// false the driver must rebuild the table to add a foreign key.
    pub alter_table_add_foreign_key: bool,
}

#[derive(Debug, Clone)]
pub struct StorageTypes {
    /// The default storage type for a string.
    pub default_string_type: db::Type,

    /// When `Some` the database supports varchar types with the specified upper
    /// limit.
    pub varchar: Option<u64>,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        storage_types: StorageTypes::SQLITE,
        alter_table_add_foreign_key: false,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        storage_types: StorageTypes::POSTGRESQL,
        alter_table_add_foreign_key: true,
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        storage_types: StorageTypes::MYSQL,
        alter_table_add_foreign_key: true,
    };
}

impl StorageTypes {
    /// SQLite storage types
    pub const SQLITE: StorageTypes = StorageTypes {
        default_string_type: db::Type::Text,

        // SQLite ignores the length in VARCHAR(N); the only limit is
        // SQLITE_MAX_LENGTH, 1 billion by default.
        varchar: Some(1_000_000_000),
    };

    pub const POSTGRESQL: StorageTypes = StorageTypes {
        default_string_type: db::Type::Text,

        // The maximum n you can specify is 10 485 760 characters.
        varchar: Some(10_485_760),
    };

    pub const MYSQL: StorageTypes = StorageTypes {
        default_string_type: db::Type::Text,

        // The effective maximum is further bounded by the 65,535 byte row
        // size shared among all columns.
        varchar: Some(65_535),
    };
}
