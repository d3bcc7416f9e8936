use super::Type;

/// The declaration of one column in a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDef {
    /// The column name
    pub name: String,

    /// Storage type of the column
    pub ty: Type,

    /// True if the column carries a `UNIQUE` constraint
    pub unique: bool,

    /// False if the column is declared `NOT NULL`
    pub nullable: bool,
}
