//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, namely trace
//! identifiers and JSON content negotiation.

pub mod accept;
pub mod trace;

pub use accept::JsonOnly;
pub use trace::Trace;
