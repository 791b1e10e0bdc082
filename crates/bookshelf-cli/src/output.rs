//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;

use bookshelf_core::Book;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is meant for people rather than scripts
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Title:  {}", book.title);
                println!("Author: {}", book.author);
                println!("Year:   {}", book.year);
                println!("Status: {}", if book.read { "Read" } else { "Unread" });
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(book)?);
            }
            OutputFormat::Quiet => {
                println!("{}", book.title);
            }
        }
        Ok(())
    }

    /// Print a list of books
    pub fn print_books(&self, books: &[&Book]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return Ok(());
                }
                println!("Your Book Collection:");
                println!();
                for (index, book) in books.iter().enumerate() {
                    println!("{}", format_book_line(index + 1, book));
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(books)?);
            }
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.title);
                }
            }
        }
        Ok(())
    }

    /// Report that no book has the given title
    pub fn not_found(&self, title: &str) {
        match self.format {
            OutputFormat::Human => println!("No book titled '{}'.", title),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "not_found", "title": title})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning on stderr
    ///
    /// Shown in every mode, including quiet.
    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"warning": message}));
            }
            OutputFormat::Human | OutputFormat::Quiet => eprintln!("⚠ Warning: {}", message),
        }
    }
}

/// One numbered line of the human book list
fn format_book_line(index: usize, book: &Book) -> String {
    let status = if book.read { "✓" } else { " " };
    format!(
        "{}. [{}] {} by {} ({})",
        index, status, book.title, book.author, book.year
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_format_book_line() {
        let mut book = Book::new("Dune", "Frank Herbert", 1965);
        assert_eq!(format_book_line(2, &book), "2. [ ] Dune by Frank Herbert (1965)");

        book.mark_read();
        assert_eq!(format_book_line(2, &book), "2. [✓] Dune by Frank Herbert (1965)");
    }

    #[test]
    fn test_is_human() {
        assert!(Output::new(OutputFormat::Human).is_human());
        assert!(!Output::new(OutputFormat::Json).is_human());
        assert!(!Output::new(OutputFormat::Quiet).is_human());
    }
}
