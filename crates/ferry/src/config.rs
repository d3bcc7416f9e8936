/// Settings shared by every mapping built against one [`Registry`].
///
/// [`Registry`]: crate::Registry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Prepended to every derived table name.
    pub table_name_prefix: Option<String>,

    /// Maximum number of loaded instances each mapping keeps. At least one
    /// instance is always kept.
    pub cache_capacity: usize,
}

impl Config {
    pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

    pub fn new() -> Config {
        Config::default()
    }

    pub fn table_name_prefix(mut self, prefix: impl Into<String>) -> Config {
        self.table_name_prefix = Some(prefix.into());
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Config {
        self.cache_capacity = capacity;
        self
    }

    /// Derives the table name for an entity: the configured prefix followed
    /// by the pluralized, snake-cased entity name.
    pub fn table_name(&self, entity: &str) -> String {
        let base = std_util::str::pluralize(&std_util::str::snake_case(entity));

        match &self.table_name_prefix {
            Some(prefix) => format!("{prefix}{base}"),
            None => base,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            table_name_prefix: None,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
        }
    }
}
