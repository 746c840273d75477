//! DTOs for decoding OpenLibrary `jscmd=data` responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! [`BookMetadata`] in one pass, filling placeholders for optional fields.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{BookMetadata, Isbn, METADATA_PLACEHOLDER};

/// Top-level response: one entry per requested bibkey.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(super) struct OpenLibraryResponseDto(pub(super) HashMap<String, OpenLibraryBookDto>);

#[derive(Debug, Deserialize)]
pub(super) struct OpenLibraryBookDto {
    pub(super) title: Option<String>,
    #[serde(default)]
    pub(super) authors: Vec<NamedDto>,
    #[serde(default)]
    pub(super) publishers: Vec<NamedDto>,
    #[serde(default)]
    pub(super) subjects: Vec<NamedDto>,
    pub(super) number_of_pages: Option<i32>,
    pub(super) notes: Option<NotesDto>,
    pub(super) cover: Option<CoverDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NamedDto {
    pub(super) name: String,
}

/// OpenLibrary returns notes either as plain text or as a typed value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum NotesDto {
    Text(String),
    Typed { value: String },
}

#[derive(Debug, Deserialize)]
pub(super) struct CoverDto {
    pub(super) small: Option<String>,
}

impl OpenLibraryResponseDto {
    /// Take the entry for `isbn`, accepting both bare and `ISBN:` keys.
    pub(super) fn take_book(mut self, isbn: &Isbn) -> Option<OpenLibraryBookDto> {
        self.0
            .remove(isbn.as_ref())
            .or_else(|| self.0.remove(&format!("ISBN:{isbn}")))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn first_name(values: Vec<NamedDto>) -> Option<String> {
    non_blank(values.into_iter().next().map(|named| named.name))
}

impl OpenLibraryBookDto {
    pub(super) fn into_metadata(self, isbn: Isbn) -> Result<BookMetadata, String> {
        let title = non_blank(self.title).ok_or_else(|| format!("book {isbn} has no title"))?;
        let author =
            first_name(self.authors).ok_or_else(|| format!("book {isbn} has no author"))?;
        let placeholder = || METADATA_PLACEHOLDER.to_owned();

        let description = non_blank(self.notes.map(|notes| match notes {
            NotesDto::Text(text) | NotesDto::Typed { value: text } => text,
        }))
        .unwrap_or_else(placeholder);

        Ok(BookMetadata {
            isbn,
            title,
            author,
            description,
            genre: first_name(self.subjects).unwrap_or_else(placeholder),
            pages: self.number_of_pages.unwrap_or(0).max(0),
            publisher: first_name(self.publishers).unwrap_or_else(placeholder),
            thumbnail_url: non_blank(self.cover.and_then(|cover| cover.small))
                .unwrap_or_else(placeholder),
        })
    }
}
