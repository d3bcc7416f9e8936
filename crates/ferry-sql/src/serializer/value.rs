use super::{Params, ToSql};

use crate::stmt;

/// Values are always bound as parameters, never inlined.
impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        placeholder.to_sql(f);
    }
}
