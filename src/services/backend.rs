//! Client for the REST backend that owns books and categories

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::BackendConfig,
    error::{AppError, AppResult},
    models::{Book, Category, NewBook},
};

/// Operations the front end needs from the backend.
///
/// Calls are awaited inside the request that needs them, so dropping the
/// request future cancels any call still in flight.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryBackend: Send + Sync {
    /// `GET /books`
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    /// `GET /categories`
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// `POST /books`. Any 2xx counts as created; the body is ignored.
    async fn create_book(&self, book: &NewBook) -> AppResult<()>;
}

/// reqwest implementation of [`LibraryBackend`]
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, &url)?;
        Ok(response.json().await?)
    }

    /// A JSON array where malformed records are skipped instead of failing the list
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<T>> {
        let records: Vec<Value> = self.get_json(path).await?;
        Ok(decode_records(records, path))
    }
}

fn decode_records<T: DeserializeOwned>(records: Vec<Value>, path: &str) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(pos, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed record #{} from {}: {}", pos, path, e);
                None
            }
        })
        .collect()
}

fn check_status(response: Response, url: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::BackendStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl LibraryBackend for HttpBackend {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.get_list("/books").await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.get_list("/categories").await
    }

    async fn create_book(&self, book: &NewBook) -> AppResult<()> {
        let url = self.url("/books");
        let response = self.client.post(&url).json(book).send().await?;
        check_status(response, &url)?;
        Ok(())
    }
}
