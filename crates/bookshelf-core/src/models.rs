//! Data models for Bookshelf
//!
//! Defines the `Book` record and the matching rules used by lookups.
//! The serialized shape is the on-disk format of the backing file.

use serde::{Deserialize, Serialize};

/// A single book in the collection
///
/// The title acts as a natural key for lookups but uniqueness is not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Book title
    pub title: String,
    /// Author name(s), free text
    pub author: String,
    /// Publication year (no range validation)
    pub year: i32,
    /// Whether the book has been read
    #[serde(default)]
    pub read: bool,
}

impl Book {
    /// Create a new, unread book
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            read: false,
        }
    }

    /// Mark this book as read
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// Case-insensitive equality against the title
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Case-insensitive substring match against the author
    pub fn author_contains(&self, query: &str) -> bool {
        self.author.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_is_unread() {
        let book = Book::new("1984", "George Orwell", 1949);
        assert_eq!(book.title, "1984");
        assert_eq!(book.author, "George Orwell");
        assert_eq!(book.year, 1949);
        assert!(!book.read);
    }

    #[test]
    fn test_title_matches_ignores_case() {
        let book = Book::new("The Hobbit", "J.R.R. Tolkien", 1937);
        assert!(book.title_matches("the hobbit"));
        assert!(book.title_matches("THE HOBBIT"));
        assert!(!book.title_matches("Hobbit"));
        assert!(!book.title_matches("The Hobbit, or There and Back Again"));
    }

    #[test]
    fn test_title_matches_non_ascii() {
        let book = Book::new("Éloge de l'ombre", "Junichirō Tanizaki", 1933);
        assert!(book.title_matches("éloge de l'ombre"));
    }

    #[test]
    fn test_author_contains_substring() {
        let book = Book::new("The Hobbit", "J.R.R. Tolkien", 1937);
        assert!(book.author_contains("tolkien"));
        assert!(book.author_contains("J.R.R"));
        assert!(book.author_contains(""));
        assert!(!book.author_contains("Lewis"));
    }

    #[test]
    fn test_mark_read() {
        let mut book = Book::new("Dune", "Frank Herbert", 1965);
        book.mark_read();
        assert!(book.read);
    }

    #[test]
    fn test_serialized_shape() {
        let book = Book::new("Dune", "Frank Herbert", 1965);
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965,
                "read": false
            })
        );
    }

    #[test]
    fn test_missing_read_defaults_to_false() {
        let book: Book =
            serde_json::from_str(r#"{"title": "Dune", "author": "Frank Herbert", "year": 1965}"#)
                .unwrap();
        assert!(!book.read);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let book: Book = serde_json::from_str(
            r#"{"title": "Dune", "author": "Frank Herbert", "year": 1965, "read": true, "isbn": "x"}"#,
        )
        .unwrap();
        assert!(book.read);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<Book, _> = serde_json::from_str(r#"{"title": "Dune", "year": 1965}"#);
        assert!(result.is_err());
    }
}
