use super::{column_def::ForeignKeyClause, Comma, Delimited, Ident, Params, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::AddForeignKey(stmt) => stmt.to_sql(f),
            Statement::CopyTable(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Pragma(stmt) => stmt.to_sql(f),
            Statement::RenameTable(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

/// `"column" = ?`
struct Assign<'a>(&'a stmt::Name, &'a stmt::Value);

impl ToSql for Assign<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, self.0 " = " self.1);
    }
}

impl ToSql for &stmt::AddForeignKey {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let fk = &self.foreign_key;
        let table = Ident(&fk.table);
        let constraint = Ident(fk.constraint_name());

        fmt!(
            f, "ALTER TABLE " table " ADD CONSTRAINT " constraint " " ForeignKeyClause(fk)
        );
    }
}

impl ToSql for &stmt::CopyTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let target_cols = Comma(self.columns.iter().map(|(target, _)| target));
        let source_cols = Comma(self.columns.iter().map(|(_, source)| source));
        let target = &self.target;
        let source = &self.source;
        fmt!(f, "INSERT INTO " target " (" target_cols ") SELECT " source_cols " FROM " source);
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = &self.name;
        let columns = Comma(&self.columns);
        let primary_key = &self.primary_key;

        fmt!(f, "CREATE TABLE " name " (" columns ", PRIMARY KEY (" primary_key ")");

        for fk in &self.foreign_keys {
            let constraint = Ident(fk.constraint_name());
            fmt!(f, ", CONSTRAINT " constraint " " ForeignKeyClause(fk));
        }

        fmt!(f, ")");
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let if_exists = self.if_exists.then_some("IF EXISTS ");
        let name = &self.name;
        fmt!(f, "DROP TABLE " if_exists name);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.table;
        let columns = Comma(&self.columns);
        let values = Comma(&self.values);

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")");
    }
}

impl ToSql for &stmt::Pragma {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match &self.value {
            Some(value) => fmt!(f, "PRAGMA " self.name.as_str() " = " value.as_str()),
            None => fmt!(f, "PRAGMA " self.name.as_str()),
        }
    }
}

impl ToSql for &stmt::RenameTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let from = &self.from;
        let to = &self.to;
        fmt!(f, "ALTER TABLE " from " RENAME TO " to);
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let projection = &self.projection;
        let table = &self.table;
        fmt!(f, "SELECT " projection " FROM " table);

        if !self.filter.is_empty() {
            let filter = Delimited(
                self.filter.iter().map(|(column, value)| Assign(column, value)),
                " AND ",
            );
            fmt!(f, " WHERE " filter);
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT " limit.to_string());
        }
    }
}

impl ToSql for &stmt::Projection {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Projection::All => fmt!(f, "*"),
            stmt::Projection::One => fmt!(f, "1"),
            stmt::Projection::Columns(columns) => fmt!(f, Comma(columns)),
            stmt::Projection::Max(column) => fmt!(f, "MAX(" column ")"),
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let assignments = Comma(
            self.assignments
                .iter()
                .map(|(column, value)| Assign(column, value)),
        );

        let table = &self.table;
        let key = Assign(&self.key_column, &self.key);

        fmt!(f, "UPDATE " table " SET " assignments " WHERE " key);
    }
}
