//! Data models for the library front end

pub mod book;
pub mod book_form;
pub mod category;

// Re-export commonly used types
pub use book::{filter_books, Book, BookFilter, BookSort, NewBook};
pub use book_form::{BookForm, Field, FormState};
pub use category::{Category, CategoryIndex, CategoryRef};
