//! Response shapes served to the frontend.
//!
//! These are the simplified, stable projections of upstream payloads. Fields
//! the upstream omits serialize as `null` (or `""` for `year`), never as an
//! error.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A single movie in a search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Upstream movie identifier.
    pub id: Option<u64>,
    pub title: Option<String>,
    /// First four characters of the release date, or empty.
    pub year: String,
    pub overview: Option<String>,
    /// Upstream poster path fragment (e.g. `"/abc123.jpg"`).
    pub poster: Option<String>,
    /// Community vote average.
    pub rating: Option<f64>,
}

/// One page of search results, in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<MovieSummary>,
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Full detail for a single movie, including top-billed cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub year: String,
    pub overview: Option<String>,
    pub poster: Option<String>,
    pub rating: Option<f64>,
    /// Genre names in upstream order.
    pub genres: Vec<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// At most [`MAX_CAST`] names, in billing order.
    pub cast: Vec<String>,
}

/// Number of cast members kept on a [`MovieDetail`].
pub const MAX_CAST: usize = 5;

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Acknowledgment returned by the root endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub service: String,
    pub ok: bool,
}

/// Human-readable service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "CineScout API";

impl ServiceStatus {
    pub fn available() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            ok: true,
        }
    }
}

/// Derive a four-character year from an upstream date like `"2023-04-15"`.
///
/// Returns an empty string when the date is absent or shorter than four
/// characters.
pub fn release_year(date: Option<&str>) -> String {
    match date {
        Some(d) if d.chars().count() >= 4 => d.chars().take(4).collect(),
        _ => String::new(),
    }
}
