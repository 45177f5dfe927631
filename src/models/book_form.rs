//! Add-book form: raw input values, validation rules and touched-field state.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::book::{NewBook, IMPORT_DAY_FORMAT};

/// ASCII digits only: `\d` in `regex` also matches other Unicode digits
static BOOK_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^BO-[0-9]{4}$").expect("valid book code pattern"));

/// Format produced by an HTML `<input type="date">`
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 100;

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BookCode,
    Title,
    Quantity,
    CategoryId,
    ImportDay,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::BookCode,
        Field::Title,
        Field::Quantity,
        Field::CategoryId,
        Field::ImportDay,
    ];

    /// HTML input name, identical to the JSON key
    pub fn name(self) -> &'static str {
        match self {
            Field::BookCode => "bookCode",
            Field::Title => "title",
            Field::Quantity => "quantity",
            Field::CategoryId => "categoryId",
            Field::ImportDay => "importDay",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::BookCode => "Book Code",
            Field::Title => "Title",
            Field::Quantity => "Quantity",
            Field::CategoryId => "Category",
            Field::ImportDay => "Date Added",
        }
    }

    /// Accepts both the struct field name and the input name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "book_code" | "bookCode" => Some(Field::BookCode),
            "title" => Some(Field::Title),
            "quantity" => Some(Field::Quantity),
            "category_id" | "categoryId" => Some(Field::CategoryId),
            "import_day" | "importDay" => Some(Field::ImportDay),
            _ => None,
        }
    }
}

/// Raw values as submitted by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BookForm {
    #[validate(custom(function = "validate_book_code"))]
    pub book_code: String,
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(custom(function = "validate_quantity"))]
    pub quantity: String,
    #[validate(length(min = 1, code = "required", message = "Category is required"))]
    pub category_id: String,
    #[validate(custom(function = "validate_import_day"))]
    pub import_day: String,
}

impl BookForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::BookCode => &self.book_code,
            Field::Title => &self.title,
            Field::Quantity => &self.quantity,
            Field::CategoryId => &self.category_id,
            Field::ImportDay => &self.import_day,
        }
    }

    /// Validate and build the creation payload: `id` is the book code and the
    /// import day is re-encoded as dd/mm/yyyy.
    pub fn to_new_book(&self) -> Result<NewBook, ValidationErrors> {
        self.validate()?;

        let quantity = parse_quantity(&self.quantity).map_err(|e| single_error("quantity", e))?;
        let import_day = parse_import_day(&self.import_day, today())
            .map_err(|e| single_error("import_day", e))?;

        Ok(NewBook {
            id: self.book_code.clone(),
            title: self.title.clone(),
            quantity,
            category_id: self.category_id.clone(),
            import_day: import_day.format(IMPORT_DAY_FORMAT).to_string(),
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn single_error(field: &'static str, err: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

fn validate_book_code(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Book code is required"));
    }
    if !BOOK_CODE_PATTERN.is_match(value) {
        return Err(error("pattern", "Book code must follow the pattern BO-XXXX"));
    }
    Ok(())
}

fn validate_title(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(error("required", "Title is required"));
    }
    if len < TITLE_MIN_LEN {
        return Err(error("min_length", "Title must contain at least 3 characters"));
    }
    if len > TITLE_MAX_LEN {
        return Err(error("max_length", "Title must not exceed 100 characters"));
    }
    Ok(())
}

fn validate_quantity(value: &str) -> Result<(), ValidationError> {
    parse_quantity(value).map(|_| ())
}

fn validate_import_day(value: &str) -> Result<(), ValidationError> {
    parse_import_day(value, today()).map(|_| ())
}

/// Number input semantics: numeric first, then minimum, then integral.
pub fn parse_quantity(value: &str) -> Result<i64, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error("required", "Quantity is required"));
    }
    let number: f64 = value
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or_else(|| error("number", "Quantity must be a number"))?;
    if number < 1.0 {
        return Err(error("min", "Quantity must be at least 1"));
    }
    if number.fract() != 0.0 || number >= i64::MAX as f64 {
        return Err(error("integer", "Quantity must be a whole number greater than 0"));
    }
    Ok(number as i64)
}

/// A date input value that is not later than `today`
pub fn parse_import_day(value: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error("required", "Date added is required"));
    }
    let date = NaiveDate::parse_from_str(value, DATE_INPUT_FORMAT)
        .map_err(|_| error("date", "Date added must be a valid date"))?;
    if date > today {
        return Err(error("max_date", "Date added cannot be later than today"));
    }
    Ok(date)
}

/// One field as the view sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldState<'a> {
    pub value: &'a str,
    pub touched: bool,
    pub error: Option<&'a str>,
}

/// Form values plus touched flags and the last validation outcome.
///
/// Errors are always computed for every field but only become visible once
/// the field has been touched.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    form: BookForm,
    touched: HashSet<Field>,
    errors: HashMap<Field, String>,
}

impl FormState {
    pub fn new(form: BookForm) -> Self {
        let mut state = Self {
            form,
            touched: HashSet::new(),
            errors: HashMap::new(),
        };
        state.validate();
        state
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    /// Field lost focus
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// Submitting touches every field
    pub fn touch_all(&mut self) {
        self.touched.extend(Field::ALL);
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::BookCode => self.form.book_code = value,
            Field::Title => self.form.title = value,
            Field::Quantity => self.form.quantity = value,
            Field::CategoryId => self.form.category_id = value,
            Field::ImportDay => self.form.import_day = value,
        }
        self.validate();
    }

    /// Re-run every rule; returns whether the form is valid
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if let Err(errors) = self.form.validate() {
            for (key, field_errors) in errors.field_errors() {
                let Some(field) = Field::from_key(&key) else {
                    continue;
                };
                let first = field_errors
                    .iter()
                    .find(|e| e.code == "required")
                    .or_else(|| field_errors.first());
                if let Some(err) = first {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    self.errors.insert(field, message);
                }
            }
        }
        self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: Field) -> FieldState<'_> {
        FieldState {
            value: self.form.value(field),
            touched: self.touched.contains(&field),
            error: self.errors.get(&field).map(String::as_str),
        }
    }

    /// Error to display next to `field`: only once it has been touched
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        let state = self.field(field);
        if state.touched {
            state.error
        } else {
            None
        }
    }
}
