//! Book reviews backend.
//!
//! A hexagonal service: [`domain`] holds the catalogue and review model, the
//! review quality verifier and the application services; [`inbound`] exposes
//! them over HTTP; [`outbound`] implements the driven ports with Diesel,
//! reqwest and jsonwebtoken.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
