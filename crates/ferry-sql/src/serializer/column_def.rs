use super::{Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);
        let unique = self.unique.then_some(" UNIQUE");
        let not_null = (!self.nullable).then_some(" NOT NULL");
        let ty = &self.ty;

        fmt!(f, name " " ty unique not_null)
    }
}

/// `FOREIGN KEY ("column") REFERENCES "table" ("column")`, without the
/// constraint name.
pub(super) struct ForeignKeyClause<'a>(pub(super) &'a stmt::ForeignKey);

impl ToSql for ForeignKeyClause<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let fk = self.0;
        let column = Ident(&fk.column);
        let references_table = Ident(&fk.references_table);
        let references_column = Ident(&fk.references_column);

        fmt!(f, "FOREIGN KEY (" column ") REFERENCES " references_table " (" references_column ")")
    }
}
