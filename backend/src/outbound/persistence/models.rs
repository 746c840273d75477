//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Varchar};

use super::schema::{books, reviews, users};

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub pages: i32,
    pub publisher: String,
    pub thumbnail_url: String,
}

/// Insertable struct for new books; `id` and `created_at` are defaulted.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub isbn: &'a str,
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub genre: &'a str,
    pub pages: i32,
    pub publisher: &'a str,
    pub thumbnail_url: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub book_id: i64,
    pub user_id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

/// Review joined with book and user columns for listing queries.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct ReviewSummaryRow {
    pub review_id: i64,
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub isbn: String,
    pub book_title: String,
    pub thumbnail_url: String,
    pub submitted_by: String,
}

/// Result row of the raw statistics aggregate.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct ReviewStatisticRow {
    #[diesel(sql_type = BigInt)]
    pub book_id: i64,
    #[diesel(sql_type = Varchar)]
    pub isbn: String,
    #[diesel(sql_type = Double)]
    pub avg: f64,
    #[diesel(sql_type = BigInt)]
    pub ratings: i64,
}
