//! Catalog service: list loading and book creation on top of the backend

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookSort, CategoryIndex, NewBook},
};

use super::backend::LibraryBackend;

#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn LibraryBackend>,
    sort: BookSort,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn LibraryBackend>, sort: BookSort) -> Self {
        Self { backend, sort }
    }

    /// All books in list order. A failed fetch is logged and yields an empty list.
    pub async fn load_books(&self) -> Vec<Book> {
        match self.backend.list_books().await {
            Ok(mut books) => {
                self.sort.apply(&mut books);
                tracing::debug!("Fetched {} books", books.len());
                books
            }
            Err(e) => {
                tracing::error!("Error fetching books: {}", e);
                Vec::new()
            }
        }
    }

    /// All categories. A failed fetch is logged and yields an empty index.
    pub async fn load_categories(&self) -> CategoryIndex {
        match self.backend.list_categories().await {
            Ok(categories) => {
                tracing::debug!("Fetched {} categories", categories.len());
                CategoryIndex::new(categories)
            }
            Err(e) => {
                tracing::error!("Error fetching categories: {}", e);
                CategoryIndex::default()
            }
        }
    }

    /// Submit a validated book to the backend
    pub async fn create_book(&self, book: &NewBook) -> AppResult<()> {
        self.backend.create_book(book).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::Category,
        services::backend::MockLibraryBackend,
    };

    fn book(id: &str, quantity: i64) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {id}"),
            quantity,
            category_id: "CAT-1".to_string(),
            import_day: None,
        }
    }

    fn unavailable() -> AppError {
        AppError::BackendStatus {
            status: 503,
            url: "http://localhost:8080/books".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_books_sorts_by_configured_order() {
        let mut backend = MockLibraryBackend::new();
        backend
            .expect_list_books()
            .times(1)
            .returning(|| Ok(vec![book("BO-0003", 9), book("BO-0001", 1), book("BO-0002", 4)]));

        let catalog = CatalogService::new(Arc::new(backend), BookSort::QuantityAsc);
        let ids: Vec<String> = catalog.load_books().await.into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["BO-0001", "BO-0002", "BO-0003"]);
    }

    #[tokio::test]
    async fn test_fetch_failures_yield_empty_state() {
        let mut backend = MockLibraryBackend::new();
        backend.expect_list_books().returning(|| Err(unavailable()));
        backend.expect_list_categories().returning(|| Err(unavailable()));

        let catalog = CatalogService::new(Arc::new(backend), BookSort::default());
        assert!(catalog.load_books().await.is_empty());
        assert!(catalog.load_categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_categories_builds_index() {
        let mut backend = MockLibraryBackend::new();
        backend.expect_list_categories().returning(|| {
            Ok(vec![Category {
                id: "CAT-1".to_string(),
                name: "Fiction".to_string(),
                description: "Made-up stories".to_string(),
            }])
        });

        let catalog = CatalogService::new(Arc::new(backend), BookSort::default());
        let index = catalog.load_categories().await;
        assert_eq!(index.resolve("CAT-1").name(), "Fiction");
    }

    #[tokio::test]
    async fn test_create_book_propagates_failure() {
        let mut backend = MockLibraryBackend::new();
        backend
            .expect_create_book()
            .times(1)
            .returning(|_| Err(unavailable()));

        let catalog = CatalogService::new(Arc::new(backend), BookSort::default());
        let new_book = NewBook {
            id: "BO-1234".to_string(),
            title: "Dune".to_string(),
            quantity: 2,
            category_id: "CAT-1".to_string(),
            import_day: "05/03/2024".to_string(),
        };
        assert!(catalog.create_book(&new_book).await.is_err());
    }
}
