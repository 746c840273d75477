//! OpenLibrary outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `BookMetadataSource` port.

mod dto;
mod http_source;

pub use http_source::{
    CUSTOM_AUTH_HEADER, CUSTOMER_ID_HEADER, OpenLibraryCredentials, OpenLibraryHttpSource,
};
