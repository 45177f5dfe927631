//! Add-book page (`GET /add`, `POST /add`)

use std::fmt::Write;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    config::DisplayConfig,
    error::AppResult,
    models::{BookForm, CategoryIndex, Field, FormState},
    AppState,
};

use super::layout::{escape, option, page};

/// Empty form; nothing is touched so no error is shown
pub async fn add_book_form(State(state): State<AppState>) -> Html<String> {
    let categories = state.services.catalog.load_categories().await;
    let form = FormState::new(BookForm::default());
    Html(render(&state.config.display, &form, &categories))
}

/// Validate, create, then go back to the list.
///
/// Invalid input re-renders with 422. A backend failure is logged and the
/// form is re-rendered with the entered values (502). A body that is not an
/// urlencoded form is rejected with 400.
pub async fn submit_book(
    State(state): State<AppState>,
    form: Result<Form<BookForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let mut form = FormState::new(form);
    form.touch_all();

    let new_book = match form.form().to_new_book() {
        Ok(book) => book,
        Err(errors) => {
            tracing::debug!("Rejected book form: {}", errors);
            let categories = state.services.catalog.load_categories().await;
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render(&state.config.display, &form, &categories)),
            )
                .into_response());
        }
    };

    let response = match state.services.catalog.create_book(&new_book).await {
        // The id matches BO-[0-9]{4}, nothing to percent-encode
        Ok(()) => Redirect::to(&format!("/?added={}", new_book.id)).into_response(),
        Err(e) => {
            tracing::error!("Error creating book {}: {}", new_book.id, e);
            let categories = state.services.catalog.load_categories().await;
            (
                StatusCode::BAD_GATEWAY,
                Html(render(&state.config.display, &form, &categories)),
            )
                .into_response()
        }
    };
    Ok(response)
}

fn render(display: &DisplayConfig, form: &FormState, categories: &CategoryIndex) -> String {
    let mut body = String::new();
    body.push_str(
        r#"<div class="container d-flex justify-content-center align-items-center vh-100"><div class="w-50 p-4 border rounded bg-light shadow">"#,
    );
    body.push_str(r#"<h1 class="text-center mb-4">Add a New Book</h1>"#);
    body.push_str(r#"<form method="post" action="/add" novalidate>"#);

    for field in Field::ALL {
        let state = form.field(field);
        let error = form.visible_error(field);
        let invalid = if error.is_some() { " is-invalid" } else { "" };

        body.push_str(r#"<div class="mb-3">"#);
        let _ = write!(
            body,
            r#"<label for="{name}" class="form-label">{label}</label>"#,
            name = field.name(),
            label = field.label(),
        );

        match field {
            Field::CategoryId => {
                let _ = write!(
                    body,
                    r#"<select id="{name}" name="{name}" class="form-select{invalid}">"#,
                    name = field.name(),
                );
                body.push_str(&option("", "Select a category", state.value));
                for category in categories.iter() {
                    body.push_str(&option(&category.id, &category.name, state.value));
                }
                body.push_str("</select>");
            }
            _ => {
                let (input_type, placeholder) = match field {
                    Field::BookCode => ("text", "Book code as BO-XXXX (e.g. BO-1234)"),
                    Field::Title => ("text", "Enter book title"),
                    Field::Quantity => ("number", "Enter quantity"),
                    _ => ("date", ""),
                };
                let _ = write!(
                    body,
                    r#"<input type="{input_type}" id="{name}" name="{name}" class="form-control{invalid}" value="{value}" placeholder="{placeholder}">"#,
                    name = field.name(),
                    value = escape(state.value),
                );
            }
        }

        if let Some(message) = error {
            let _ = write!(body, r#"<div class="text-danger">{}</div>"#, escape(message));
        }
        body.push_str("</div>");
    }

    body.push_str(r#"<button type="submit" class="btn btn-primary w-100">Add</button>"#);
    body.push_str("</form>");
    body.push_str(r#"<a href="/" class="d-block text-center mt-3">Back to the list</a>"#);
    body.push_str("</div></div>");

    page("Add a New Book", &display.stylesheet_url, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn categories() -> CategoryIndex {
        CategoryIndex::new(vec![Category {
            id: "CAT-1".to_string(),
            name: "Fiction".to_string(),
            description: String::new(),
        }])
    }

    #[test]
    fn test_fresh_form_shows_no_errors() {
        let form = FormState::new(BookForm::default());
        let html = render(&DisplayConfig::default(), &form, &categories());
        assert!(!html.contains("text-danger"));
        assert!(html.contains(r#"<option value="">Select a category</option>"#));
        assert!(html.contains(r#"<option value="CAT-1">Fiction</option>"#));
        assert!(html.contains(r#"type="date" id="importDay""#));
    }

    #[test]
    fn test_touched_field_shows_error_and_keeps_value() {
        let mut form = FormState::new(BookForm {
            book_code: "BO-12".to_string(),
            category_id: "CAT-1".to_string(),
            ..Default::default()
        });
        form.blur(Field::BookCode);

        let html = render(&DisplayConfig::default(), &form, &categories());
        assert!(html.contains("Book code must follow the pattern BO-XXXX"));
        assert!(html.contains(r#"value="BO-12""#));
        assert!(html.contains(r#"<option value="CAT-1" selected>Fiction</option>"#));
        // Untouched fields stay quiet even though they are invalid
        assert!(!html.contains("Title is required"));
    }
}
