use super::{Flavor, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Type {
    fn to_sql<T: Params>(self, f: &mut super::Formatter<'_, T>) {
        let flavor = f.serializer.flavor;

        let sql = match self {
            stmt::Type::Boolean => match flavor {
                Flavor::Mysql => "BOOL".to_string(),
                _ => "BOOLEAN".to_string(),
            },
            stmt::Type::Integer(1) => match flavor {
                // PostgreSQL has no single byte integer
                Flavor::Postgresql => "SMALLINT".to_string(),
                _ => "TINYINT".to_string(),
            },
            stmt::Type::Integer(2) => "SMALLINT".to_string(),
            stmt::Type::Integer(4) => match flavor {
                Flavor::Mysql => "INT".to_string(),
                _ => "INTEGER".to_string(),
            },
            stmt::Type::Integer(_) => "BIGINT".to_string(),
            stmt::Type::Float => match flavor {
                Flavor::Postgresql => "REAL".to_string(),
                _ => "FLOAT".to_string(),
            },
            stmt::Type::Double => match flavor {
                Flavor::Postgresql => "DOUBLE PRECISION".to_string(),
                _ => "DOUBLE".to_string(),
            },
            stmt::Type::Char(n) => format!("CHAR({n})"),
            stmt::Type::Text => "TEXT".to_string(),
            stmt::Type::VarChar(n) => format!("VARCHAR({n})"),
            stmt::Type::DateTime => match flavor {
                Flavor::Postgresql => "TIMESTAMP".to_string(),
                _ => "DATETIME".to_string(),
            },
            stmt::Type::Custom(ty) => ty.clone(),
        };

        fmt!(f, sql);
    }
}
