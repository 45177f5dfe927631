//! Library Web
//!
//! Server-rendered front end for a small library: a searchable book list and
//! an add-book form, both backed by a REST service for books and categories.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use views::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
