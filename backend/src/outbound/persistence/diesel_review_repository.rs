//! PostgreSQL-backed `ReviewRepository` implementation using Diesel ORM.
//!
//! Listings join reviews with their book and author so the read model is
//! produced in a single query. Statistics use a raw aggregate because the
//! rounded average has no direct DSL equivalent.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{Isbn, ReviewDraft, ReviewStatistic, ReviewSummary};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewReviewRow, ReviewStatisticRow, ReviewSummaryRow};
use super::pool::{DbPool, PoolError};
use super::schema::{books, reviews, users};

const STATISTICS_SQL: &str = "\
SELECT b.id AS book_id, \
       b.isbn AS isbn, \
       ROUND(AVG(r.rating)::numeric, 2)::float8 AS avg, \
       COUNT(r.id) AS ratings \
FROM reviews r \
JOIN books b ON b.id = r.book_id \
GROUP BY b.id, b.isbn \
ORDER BY b.id";

/// Diesel-backed implementation of the review repository port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    map_basic_pool_error(error, ReviewRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewRepositoryError {
    map_basic_diesel_error(
        error,
        ReviewRepositoryError::query,
        ReviewRepositoryError::connection,
    )
}

fn parse_isbn(raw: &str) -> Result<Isbn, ReviewRepositoryError> {
    Isbn::new(raw).map_err(|err| ReviewRepositoryError::query(format!("stored isbn: {err}")))
}

fn row_to_summary(row: ReviewSummaryRow) -> Result<ReviewSummary, ReviewRepositoryError> {
    Ok(ReviewSummary {
        review_id: row.review_id,
        review_title: row.title,
        review_content: row.content,
        rating: row.rating,
        book_isbn: parse_isbn(&row.isbn)?,
        book_title: row.book_title,
        book_thumbnail_url: row.thumbnail_url,
        submitted_by: row.submitted_by,
        submitted_at: row.created_at,
    })
}

fn row_to_statistic(row: ReviewStatisticRow) -> Result<ReviewStatistic, ReviewRepositoryError> {
    Ok(ReviewStatistic {
        book_id: row.book_id,
        isbn: parse_isbn(&row.isbn)?,
        avg: row.avg,
        ratings: row.ratings,
    })
}

fn rows_to_summaries(
    rows: Vec<ReviewSummaryRow>,
) -> Result<Vec<ReviewSummary>, ReviewRepositoryError> {
    rows.into_iter().map(row_to_summary).collect()
}

/// Reviews joined with book and author, projected onto [`ReviewSummaryRow`].
macro_rules! summary_query {
    () => {
        reviews::table
            .inner_join(books::table)
            .inner_join(users::table)
            .select((
                reviews::id,
                reviews::title,
                reviews::content,
                reviews::rating,
                reviews::created_at,
                books::isbn,
                books::title,
                books::thumbnail_url,
                users::name,
            ))
    };
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn save(&self, draft: &ReviewDraft) -> Result<i64, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reviews::table)
            .values(NewReviewRow {
                book_id: draft.book_id,
                user_id: draft.user_id,
                title: draft.review.title(),
                content: draft.review.content(),
                rating: draft.review.rating().value(),
                created_at: draft.created_at,
            })
            .returning(reviews::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        isbn: &Isbn,
        review_id: i64,
    ) -> Result<Option<ReviewSummary>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        summary_query!()
            .filter(reviews::id.eq(review_id))
            .filter(books::isbn.eq(isbn.as_ref()))
            .first::<ReviewSummaryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_summary)
            .transpose()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ReviewSummary>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = summary_query!()
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .limit(limit)
            .load::<ReviewSummaryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_summaries(rows)
    }

    async fn list_top_rated(
        &self,
        limit: i64,
    ) -> Result<Vec<ReviewSummary>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = summary_query!()
            .order((
                reviews::rating.desc(),
                reviews::created_at.desc(),
                reviews::id.desc(),
            ))
            .limit(limit)
            .load::<ReviewSummaryRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_summaries(rows)
    }

    async fn statistics(&self) -> Result<Vec<ReviewStatistic>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReviewStatisticRow> = diesel::sql_query(STATISTICS_SQL)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_statistic).collect()
    }

    async fn delete(&self, isbn: &Isbn, review_id: i64) -> Result<bool, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let book_ids = books::table
            .filter(books::isbn.eq(isbn.as_ref()))
            .select(books::id);
        let deleted = diesel::delete(
            reviews::table
                .filter(reviews::id.eq(review_id))
                .filter(reviews::book_id.eq_any(book_ids)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
