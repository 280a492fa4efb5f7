//! Upstream gateway: turns CineScout requests into TMDB calls and back.
//!
//! # Module layout
//!
//! - [`provider`] -- The [`MovieProvider`] trait the HTTP layer depends on.
//! - [`tmdb`] -- TMDB implementation: parameter building, upstream calls,
//!   projection.
//! - [`model`] -- Simplified response shapes served to the frontend.
//! - [`error`] -- [`GatewayError`] and its HTTP status mapping.

pub mod error;
pub mod model;
pub mod provider;
pub mod tmdb;

pub use error::GatewayError;
pub use model::{MovieDetail, MovieSummary, SearchResultPage, ServiceStatus};
pub use provider::MovieProvider;
pub use tmdb::TmdbGateway;
