//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::on_constraint;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookMetadata, Isbn};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BookRow, NewBookRow};
use super::pool::{DbPool, PoolError};
use super::schema::books;

/// Diesel-backed implementation of the book repository port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookRepositoryError {
    map_basic_pool_error(error, BookRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookRepositoryError {
    map_basic_diesel_error(
        error,
        BookRepositoryError::query,
        BookRepositoryError::connection,
    )
}

pub(crate) fn row_to_book(row: BookRow) -> Result<Book, BookRepositoryError> {
    let BookRow {
        id,
        isbn,
        title,
        author,
        description,
        genre,
        pages,
        publisher,
        thumbnail_url,
    } = row;
    let isbn = Isbn::new(&isbn)
        .map_err(|err| BookRepositoryError::query(format!("stored book {id}: {err}")))?;
    Ok(Book {
        id,
        isbn,
        title,
        author,
        description,
        genre,
        pages,
        publisher,
        thumbnail_url,
    })
}

fn new_row(metadata: &BookMetadata) -> NewBookRow<'_> {
    NewBookRow {
        isbn: metadata.isbn.as_ref(),
        title: &metadata.title,
        author: &metadata.author,
        description: &metadata.description,
        genre: &metadata.genre,
        pages: metadata.pages,
        publisher: &metadata.publisher,
        thumbnail_url: &metadata.thumbnail_url,
    }
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        books::table
            .filter(books::isbn.eq(isbn.as_ref()))
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_book)
            .transpose()
    }

    async fn save(&self, metadata: &BookMetadata) -> Result<Book, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(books::table)
            .values(new_row(metadata))
            .on_conflict(on_constraint("books_isbn_key"))
            .do_nothing()
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let row = match inserted {
            Some(row) => row,
            // Lost a race with a concurrent insert; keep the stored row.
            None => books::table
                .filter(books::isbn.eq(metadata.isbn.as_ref()))
                .select(BookRow::as_select())
                .first(&mut conn)
                .await
                .map_err(map_diesel_error)?,
        };
        row_to_book(row)
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookRow> = books::table
            .order(books::id.asc())
            .select(BookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_book).collect()
    }
}
