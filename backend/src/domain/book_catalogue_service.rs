//! Catalogue read service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{BookRepository, BooksQuery};
use crate::domain::review_service::map_book_error;
use crate::domain::{Book, Error};

/// Service implementing [`BooksQuery`].
#[derive(Clone)]
pub struct BookCatalogueService<B> {
    book_repo: Arc<B>,
}

impl<B> BookCatalogueService<B> {
    pub fn new(book_repo: Arc<B>) -> Self {
        Self { book_repo }
    }
}

#[async_trait]
impl<B> BooksQuery for BookCatalogueService<B>
where
    B: BookRepository,
{
    async fn get_all_books(&self) -> Result<Vec<Book>, Error> {
        self.book_repo.list_all().await.map_err(map_book_error)
    }
}
