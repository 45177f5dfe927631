//! Book list page (`GET /`)

use std::fmt::Write;

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::{
    config::DisplayConfig,
    models::{filter_books, Book, BookFilter, CategoryIndex},
    AppState,
};

use super::layout::{escape, option, page};

pub const EMPTY_MESSAGE: &str = "No matching books found.";

/// Query string of the list page
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub q: String,
    pub category: String,
    /// Id of a book created just before the redirect here
    pub added: Option<String>,
}

impl ListParams {
    pub fn filter(&self) -> BookFilter {
        BookFilter {
            q: self.q.clone(),
            category: self.category.clone(),
        }
    }
}

/// Fetch books then categories, apply the search and render the table
pub async fn book_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Html<String> {
    let books = state.services.catalog.load_books().await;
    let categories = state.services.catalog.load_categories().await;

    let filter = params.filter();
    let filtered = filter_books(&books, &filter);

    Html(render(
        &state.config.display,
        &filtered,
        &categories,
        &filter,
        params.added.as_deref(),
    ))
}

fn render(
    display: &DisplayConfig,
    books: &[&Book],
    categories: &CategoryIndex,
    filter: &BookFilter,
    added: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str(r#"<div class="container my-5">"#);
    body.push_str(r#"<h1 class="text-center mb-4">Library</h1>"#);

    if let Some(id) = added.filter(|id| !id.is_empty()) {
        let _ = write!(
            body,
            r#"<div class="alert alert-success" role="alert">Book {} added successfully</div>"#,
            escape(id)
        );
    }

    body.push_str(r#"<div class="d-flex justify-content-between mb-3">"#);
    body.push_str(r#"<form method="get" action="/" class="d-flex flex-grow-1">"#);
    let _ = write!(
        body,
        r#"<input type="text" name="q" class="form-control w-50" placeholder="Search by title..." value="{}">"#,
        escape(&filter.q)
    );
    body.push_str(r#"<select name="category" class="form-select w-25 ms-2">"#);
    body.push_str(&option("", "All Categories", &filter.category));
    for category in categories.iter() {
        body.push_str(&option(&category.id, &category.name, &filter.category));
    }
    body.push_str("</select>");
    body.push_str(r#"<button type="submit" class="btn btn-secondary ms-2">Search</button>"#);
    body.push_str("</form>");
    body.push_str(r#"<a href="/add" class="btn btn-primary ms-2">Add a new Book</a>"#);
    body.push_str("</div>");

    if books.is_empty() {
        let _ = write!(body, r#"<p class="text-center mt-4">{}</p>"#, EMPTY_MESSAGE);
    } else {
        body.push_str(r#"<table class="table table-striped table-bordered">"#);
        body.push_str(
            r#"<thead class="table-dark"><tr><th>Book ID</th><th>Title</th><th>Quantity</th><th>Category</th><th>Category Description</th><th>Date Added</th></tr></thead>"#,
        );
        body.push_str("<tbody>");
        for book in books {
            let category = categories.resolve(&book.category_id);
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&book.id),
                escape(&book.title),
                book.quantity,
                escape(category.name()),
                escape(category.description()),
                escape(&book.display_import_day(&display.date_format)),
            );
        }
        body.push_str("</tbody></table>");
    }

    body.push_str("</div>");
    page("Library", &display.stylesheet_url, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn sample() -> (Vec<Book>, CategoryIndex) {
        let books = vec![Book {
            id: "BO-0001".to_string(),
            title: "Learning <SQL>".to_string(),
            quantity: 3,
            category_id: "CAT-404".to_string(),
            import_day: Some("05/03/2024".to_string()),
        }];
        let categories = CategoryIndex::new(vec![Category {
            id: "CAT-1".to_string(),
            name: "Databases".to_string(),
            description: "Storage".to_string(),
        }]);
        (books, categories)
    }

    #[test]
    fn test_row_with_unknown_category() {
        let (books, categories) = sample();
        let refs: Vec<&Book> = books.iter().collect();
        let html = render(
            &DisplayConfig::default(),
            &refs,
            &categories,
            &BookFilter::default(),
            None,
        );
        assert!(html.contains(
            "<tr><td>BO-0001</td><td>Learning &lt;SQL&gt;</td><td>3</td><td>N/A</td><td>N/A</td><td>05/03/2024</td></tr>"
        ));
        assert!(!html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("alert-success"));
    }

    #[test]
    fn test_empty_state_keeps_search_inputs() {
        let (_, categories) = sample();
        let filter = BookFilter {
            q: "rust".to_string(),
            category: "CAT-1".to_string(),
        };
        let html = render(&DisplayConfig::default(), &[], &categories, &filter, Some("BO-0009"));
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("<table"));
        assert!(html.contains(r#"value="rust""#));
        assert!(html.contains(r#"<option value="CAT-1" selected>Databases</option>"#));
        assert!(html.contains("Book BO-0009 added successfully"));
    }
}
