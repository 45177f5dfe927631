//! Book records as served by the backend, plus the list ordering and search filter.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Storage format of `importDay` on the backend
pub const IMPORT_DAY_FORMAT: &str = "%d/%m/%Y";

/// Placeholder shown for values that cannot be resolved
pub const NOT_AVAILABLE: &str = "N/A";

/// A book record from `GET /books`
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Some stores hand numbers back as strings
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub quantity: i64,
    pub category_id: String,
    #[serde(default)]
    pub import_day: Option<String>,
}

impl Book {
    /// Import day rendered with `display_format`, or "N/A" when absent or unparseable
    pub fn display_import_day(&self, display_format: &str) -> String {
        self.import_day
            .as_deref()
            .and_then(|raw| reformat_import_day(raw, display_format))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

fn reformat_import_day(raw: &str, display_format: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), IMPORT_DAY_FORMAT).ok()?;
    let mut out = String::new();
    // An invalid format string surfaces as fmt::Error instead of a panic here
    write!(out, "{}", date.format(display_format)).ok()?;
    Some(out)
}

/// Creation payload for `POST /books`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub id: String,
    pub title: String,
    pub quantity: i64,
    pub category_id: String,
    pub import_day: String,
}

/// Ordering applied to the book list after every fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookSort {
    #[default]
    QuantityAsc,
    QuantityDesc,
    Title,
}

impl BookSort {
    /// Sort in place. All orderings are stable.
    pub fn apply(self, books: &mut [Book]) {
        match self {
            BookSort::QuantityAsc => books.sort_by_key(|b| b.quantity),
            BookSort::QuantityDesc => books.sort_by(|a, b| b.quantity.cmp(&a.quantity)),
            BookSort::Title => books.sort_by_cached_key(|b| b.title.to_lowercase()),
        }
    }
}

/// Search parameters of the list view
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookFilter {
    /// Case-insensitive substring of the title
    pub q: String,
    /// Category id; empty means all categories
    pub category: String,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        let matches_title = book.title.to_lowercase().contains(&self.q.to_lowercase());
        let matches_category = self.category.is_empty() || book.category_id == self.category;
        matches_title && matches_category
    }
}

/// Books passing `filter`, order preserved
pub fn filter_books<'a>(books: &'a [Book], filter: &BookFilter) -> Vec<&'a Book> {
    books.iter().filter(|book| filter.matches(book)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, quantity: i64, category_id: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            quantity,
            category_id: category_id.to_string(),
            import_day: Some("05/03/2024".to_string()),
        }
    }

    fn shelf() -> Vec<Book> {
        let mut books = vec![
            book("BO-0001", "Learning SQL", 7, "CAT-1"),
            book("BO-0002", "Rust in Action", 2, "CAT-2"),
            book("BO-0003", "SQL Antipatterns", 2, "CAT-2"),
            book("BO-0004", "The Pragmatic Programmer", 5, "CAT-1"),
        ];
        BookSort::QuantityAsc.apply(&mut books);
        books
    }

    #[test]
    fn test_quantity_sort_is_stable_and_ascending() {
        let books = shelf();
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["BO-0002", "BO-0003", "BO-0004", "BO-0001"]);
    }

    #[test]
    fn test_other_sort_orders() {
        let mut books = shelf();
        BookSort::QuantityDesc.apply(&mut books);
        assert_eq!(books[0].id, "BO-0001");
        assert_eq!(books[3].id, "BO-0003");

        BookSort::Title.apply(&mut books);
        assert_eq!(books[0].title, "Learning SQL");
        assert_eq!(books[3].title, "The Pragmatic Programmer");
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let books = shelf();
        let filtered = filter_books(&books, &BookFilter::default());
        assert_eq!(filtered.len(), books.len());
        assert!(filtered.iter().zip(books.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let books = shelf();
        let filter = BookFilter {
            q: "sql".to_string(),
            ..Default::default()
        };
        let titles: Vec<&str> = filter_books(&books, &filter)
            .into_iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(titles, vec!["SQL Antipatterns", "Learning SQL"]);
    }

    #[test]
    fn test_category_and_query_combine_with_and() {
        let books = shelf();
        let filter = BookFilter {
            q: "sql".to_string(),
            category: "CAT-2".to_string(),
        };
        let filtered = filter_books(&books, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "BO-0003");

        let filter = BookFilter {
            q: "pragmatic".to_string(),
            category: "CAT-2".to_string(),
        };
        assert!(filter_books(&books, &filter).is_empty());
    }

    #[test]
    fn test_display_import_day() {
        let mut b = book("BO-0001", "Learning SQL", 1, "CAT-1");
        assert_eq!(b.display_import_day("%d/%m/%Y"), "05/03/2024");
        assert_eq!(b.display_import_day("%Y-%m-%d"), "2024-03-05");

        b.import_day = None;
        assert_eq!(b.display_import_day("%d/%m/%Y"), "N/A");

        b.import_day = Some("31/02/2024".to_string());
        assert_eq!(b.display_import_day("%d/%m/%Y"), "N/A");
    }

    #[test]
    fn test_deserialize_backend_record() {
        let b: Book = serde_json::from_str(
            r#"{"id":"BO-0042","title":"Dune","quantity":"3","categoryId":"CAT-9","importDay":"01/01/2020"}"#,
        )
        .unwrap();
        assert_eq!(b.quantity, 3);
        assert_eq!(b.category_id, "CAT-9");

        let b: Book =
            serde_json::from_str(r#"{"id":"BO-0043","title":"Emma","quantity":4,"categoryId":"CAT-1"}"#)
                .unwrap();
        assert_eq!(b.quantity, 4);
        assert_eq!(b.import_day, None);
    }
}
