//! Book command handlers

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use bookshelf_core::Store;

use crate::output::Output;
use crate::prompt::Prompter;

/// List all books, or only the unread ones
pub fn list(store: &Store, unread_only: bool, output: &Output) -> Result<()> {
    let books = if unread_only {
        store.unread()
    } else {
        store.list().iter().collect()
    };

    output.print_books(&books)
}

/// Add a new book, prompting for anything not given
pub fn add<R: BufRead, W: Write>(
    store: &mut Store,
    title: Option<String>,
    author: Option<String>,
    year: Option<i32>,
    prompter: &mut Prompter<R, W>,
    output: &Output,
) -> Result<()> {
    let title = prompter.value_or_ask(title, "Title")?;
    let author = prompter.value_or_ask(author, "Author")?;
    let year = prompter.year_or_ask(year, "Year")?;

    let book = store
        .add(title, author, year)
        .context("Failed to add book")?;

    output.success(&format!(
        "Added: {} by {} ({})",
        book.title, book.author, book.year
    ));
    output.print_book(book)
}

/// Remove a book by title
pub fn remove<R: BufRead, W: Write>(
    store: &mut Store,
    title: Option<String>,
    prompter: &mut Prompter<R, W>,
    output: &Output,
) -> Result<()> {
    let title = prompter.value_or_ask(title, "Title of the book to remove")?;

    if store.remove(&title).context("Failed to remove book")? {
        output.success(&format!("Removed: {}", title));
    } else {
        output.not_found(&title);
    }
    Ok(())
}

/// Find books by author (substring, ignoring case)
pub fn find<R: BufRead, W: Write>(
    store: &Store,
    author: Option<String>,
    prompter: &mut Prompter<R, W>,
    output: &Output,
) -> Result<()> {
    let author = prompter.value_or_ask(author, "Author name")?;
    output.print_books(&store.find_by_author(&author))
}

/// Show a single book by title
pub fn show<R: BufRead, W: Write>(
    store: &Store,
    title: Option<String>,
    prompter: &mut Prompter<R, W>,
    output: &Output,
) -> Result<()> {
    let title = prompter.value_or_ask(title, "Title")?;

    match store.find_by_title(&title) {
        Some(book) => output.print_book(book),
        None => {
            output.not_found(&title);
            Ok(())
        }
    }
}

/// Mark a book as read
pub fn mark_read<R: BufRead, W: Write>(
    store: &mut Store,
    title: Option<String>,
    prompter: &mut Prompter<R, W>,
    output: &Output,
) -> Result<()> {
    let title = prompter.value_or_ask(title, "Title of the book you finished")?;

    if store.mark_read(&title).context("Failed to mark book as read")? {
        output.success(&format!("Marked as read: {}", title));
    } else {
        output.not_found(&title);
    }
    Ok(())
}
