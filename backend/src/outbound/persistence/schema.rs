//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Book catalogue. `isbn` is unique.
    books (id) {
        id -> Int8,
        isbn -> Varchar,
        title -> Text,
        author -> Text,
        description -> Text,
        genre -> Text,
        pages -> Int4,
        publisher -> Text,
        thumbnail_url -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Review authors, unique on `(name, email)`.
    users (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    reviews (id) {
        id -> Int8,
        book_id -> Int8,
        user_id -> Int8,
        title -> Varchar,
        content -> Text,
        /// Between 1 and 5, enforced by a check constraint.
        rating -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(reviews -> books (book_id));
diesel::joinable!(reviews -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(books, reviews, users);
