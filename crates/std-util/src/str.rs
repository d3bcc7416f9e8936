use heck::ToSnakeCase;

/// Converts a type name such as `BlogPost` to `blog_post`.
pub fn snake_case(name: &str) -> String {
    name.to_snake_case()
}

/// Returns the plural form of an English word.
pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}
