//! Trait definition for movie metadata providers.
//!
//! The HTTP layer only sees [`MovieProvider`]; the TMDB gateway is the one
//! concrete implementation.

use async_trait::async_trait;

use super::error::Result;
use super::model::{MovieDetail, SearchResultPage};

/// Async interface the HTTP layer calls for every request.
///
/// Implementations are shared across request tasks behind an `Arc`, so they
/// must not hold per-request mutable state.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when a credential has been configured.
    fn is_available(&self) -> bool;

    /// Search movies by free text. `page` is forwarded untouched.
    async fn search(&self, query: &str, page: i64) -> Result<SearchResultPage>;

    /// Fetch detail and top-billed cast for a single movie.
    async fn movie_detail(&self, movie_id: i64) -> Result<MovieDetail>;
}
