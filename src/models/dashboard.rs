//! Home page figures

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Word whose case-insensitive occurrences in titles the home page counts
pub const HIGHLIGHTED_WORD: &str = "the";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct CatalogCounts {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
    /// Books whose title contains the highlighted word, in any case
    pub books_containing_word: i64,
}

/// Home page: catalog figures and the session's visit count
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardPage {
    pub counts: CatalogCounts,
    pub word: String,
    /// Visits in this session before the current one
    pub num_visits: i64,
}

/// ILIKE pattern matching `word` anywhere, with LIKE wildcards taken literally
pub fn contains_pattern(word: &str) -> String {
    let mut pattern = String::with_capacity(word.len() + 2);
    pattern.push('%');
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_word_in_wildcards() {
        assert_eq!(contains_pattern(HIGHLIGHTED_WORD), "%the%");
    }

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
