//! TMDB (The Movie Database) gateway.
//!
//! Implements [`MovieProvider`] by querying the TMDB v3 REST API.
//!
//! - Every call carries `api_key` and `language` ahead of any per-call params.
//! - Each request is bounded by the configured timeout (10 seconds by default).
//! - No retries and no rate limiting: one inbound request, one fresh upstream
//!   call (two for detail lookups).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{GatewayError, Result};
use super::model::{release_year, MovieDetail, MovieSummary, SearchResultPage, MAX_CAST};
use super::provider::MovieProvider;
use crate::config::TmdbConfig;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Query keys owned by the gateway. Callers can never override them.
const RESERVED_PARAMS: [&str; 2] = ["api_key", "language"];

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    page: Option<u32>,
    total_pages: Option<u32>,
    results: Option<Vec<TmdbMovieSearchResult>>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieSearchResult {
    id: Option<u64>,
    title: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetail {
    id: Option<u64>,
    title: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
    genres: Option<Vec<TmdbGenre>>,
    runtime: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    cast: Option<Vec<TmdbCastMember>>,
}

#[derive(Debug, Deserialize)]
struct TmdbCastMember {
    name: Option<String>,
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

impl From<TmdbMovieSearchResult> for MovieSummary {
    fn from(r: TmdbMovieSearchResult) -> Self {
        Self {
            id: r.id,
            title: r.title,
            year: release_year(r.release_date.as_deref()),
            overview: r.overview,
            poster: r.poster_path,
            rating: r.vote_average,
        }
    }
}

impl From<TmdbSearchResponse> for SearchResultPage {
    fn from(body: TmdbSearchResponse) -> Self {
        Self {
            page: body.page.unwrap_or(1),
            total_pages: body.total_pages.unwrap_or(1),
            results: body
                .results
                .unwrap_or_default()
                .into_iter()
                .map(MovieSummary::from)
                .collect(),
        }
    }
}

impl TmdbCredits {
    /// Names of the first [`MAX_CAST`] billed cast members.
    fn top_billed(self) -> Vec<String> {
        self.cast
            .unwrap_or_default()
            .into_iter()
            .take(MAX_CAST)
            .filter_map(|p| p.name)
            .collect()
    }
}

fn to_movie_detail(detail: TmdbMovieDetail, cast: Vec<String>) -> MovieDetail {
    MovieDetail {
        id: detail.id,
        title: detail.title,
        year: release_year(detail.release_date.as_deref()),
        overview: detail.overview,
        poster: detail.poster_path,
        rating: detail.vote_average,
        genres: detail
            .genres
            .unwrap_or_default()
            .into_iter()
            .filter_map(|g| g.name)
            .collect(),
        runtime: detail.runtime,
        cast,
    }
}

// ---------------------------------------------------------------------------
// Gateway implementation
// ---------------------------------------------------------------------------

/// TMDB movie gateway.
///
/// The credential is injected once at construction. When it is missing the
/// gateway still builds, but every operation fails with
/// [`GatewayError::Configuration`] before touching the network.
///
/// # Examples
///
/// ```no_run
/// use cinescout::config::TmdbConfig;
/// use cinescout::gateway::TmdbGateway;
///
/// let config = TmdbConfig {
///     api_key: Some("your-api-key".into()),
///     ..TmdbConfig::default()
/// };
/// let gateway = TmdbGateway::new(&config).unwrap();
/// ```
pub struct TmdbGateway {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    language: String,
}

impl TmdbGateway {
    /// Create a gateway from the `[tmdb]` config section.
    ///
    /// An empty API key is treated the same as no key at all.
    pub fn new(config: &TmdbConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build TMDB HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    /// Build the query parameters for one upstream call.
    ///
    /// `api_key` and `language` always come first and always win: any extra
    /// pair using one of those keys is dropped.
    fn query_params(
        &self,
        extra: &[(&'static str, String)],
    ) -> Result<Vec<(&'static str, String)>> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::Configuration)?;

        let mut params = vec![
            ("api_key", api_key.to_string()),
            ("language", self.language.clone()),
        ];
        params.extend(
            extra
                .iter()
                .filter(|(key, _)| !RESERVED_PARAMS.contains(key))
                .cloned(),
        );
        Ok(params)
    }

    /// Issue a GET and decode the JSON body.
    ///
    /// Non-success statuses become [`GatewayError::Upstream`] carrying the raw
    /// upstream body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        what: &'static str,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB {what} request");

        let resp = self.client.get(&url).query(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| GatewayError::Decode { what, source })
    }
}

#[async_trait]
impl MovieProvider for TmdbGateway {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, page: i64) -> Result<SearchResultPage> {
        let params = self.query_params(&[
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("include_adult", "false".to_string()),
        ])?;

        let body: TmdbSearchResponse = self.get_json("search", "/search/movie", &params).await?;
        Ok(body.into())
    }

    async fn movie_detail(&self, movie_id: i64) -> Result<MovieDetail> {
        let params = self.query_params(&[])?;
        let detail_path = format!("/movie/{movie_id}");
        let credits_path = format!("/movie/{movie_id}/credits");

        let (detail, credits) = tokio::join!(
            self.get_json::<TmdbMovieDetail>("movie detail", &detail_path, &params),
            self.get_json::<TmdbCredits>("credits", &credits_path, &params),
        );

        let detail = detail?;
        let cast = match credits {
            Ok(credits) => credits.top_billed(),
            Err(e) => {
                warn!(movie_id, error = %e, "TMDB credits unavailable, returning empty cast");
                Vec::new()
            }
        };

        Ok(to_movie_detail(detail, cast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(api_key: Option<&str>) -> TmdbGateway {
        let config = TmdbConfig {
            api_key: api_key.map(String::from),
            ..TmdbConfig::default()
        };
        TmdbGateway::new(&config).unwrap()
    }

    #[test]
    fn fixed_params_come_first() {
        let params = gateway(Some("key"))
            .query_params(&[("query", "Matrix".into()), ("page", "2".into())])
            .unwrap();
        let keys: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["api_key", "language", "query", "page"]);
        assert_eq!(params[0].1, "key");
        assert_eq!(params[1].1, "en-US");
    }

    #[test]
    fn fixed_params_win_on_collision() {
        let params = gateway(Some("key"))
            .query_params(&[("api_key", "evil".into()), ("language", "fr-FR".into())])
            .unwrap();
        assert_eq!(
            params,
            vec![("api_key", "key".to_string()), ("language", "en-US".to_string())]
        );
    }

    #[test]
    fn missing_credential_is_configuration_error() {
        let err = gateway(None).query_params(&[]).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration));
    }

    #[test]
    fn empty_credential_counts_as_missing() {
        let gw = gateway(Some(""));
        assert!(!gw.is_available());
        assert!(matches!(gw.query_params(&[]), Err(GatewayError::Configuration)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = TmdbConfig {
            base_url: "http://localhost:9000/3/".into(),
            ..TmdbConfig::default()
        };
        let gw = TmdbGateway::new(&config).unwrap();
        assert_eq!(gw.base_url, "http://localhost:9000/3");
    }

    #[test]
    fn search_page_defaults_when_absent() {
        let body: TmdbSearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        let page = SearchResultPage::from(body);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.results.is_empty());
    }

    #[test]
    fn search_item_tolerates_missing_fields() {
        let body: TmdbSearchResponse =
            serde_json::from_str(r#"{"page": 3, "total_pages": 9, "results": [{"id": 7}]}"#)
                .unwrap();
        let page = SearchResultPage::from(body);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 9);
        assert_eq!(
            page.results,
            vec![MovieSummary {
                id: Some(7),
                title: None,
                year: String::new(),
                overview: None,
                poster: None,
                rating: None,
            }]
        );
    }

    #[test]
    fn top_billed_keeps_first_five_in_order() {
        let credits: TmdbCredits = serde_json::from_str(
            r#"{"cast": [{"name": "A"}, {"name": "B"}, {"name": "C"},
                         {"name": "D"}, {"name": "E"}, {"name": "F"}]}"#,
        )
        .unwrap();
        assert_eq!(credits.top_billed(), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn top_billed_handles_missing_cast() {
        let credits: TmdbCredits = serde_json::from_str("{}").unwrap();
        assert!(credits.top_billed().is_empty());
    }

    #[test]
    fn detail_projection_keeps_genre_order() {
        let detail: TmdbMovieDetail = serde_json::from_str(
            r#"{"id": 603, "title": "The Matrix", "release_date": "1999-03-31",
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
                "runtime": 136}"#,
        )
        .unwrap();
        let movie = to_movie_detail(detail, vec!["Keanu Reeves".into()]);
        assert_eq!(movie.year, "1999");
        assert_eq!(movie.genres, ["Action", "Science Fiction"]);
        assert_eq!(movie.runtime, Some(136));
        assert_eq!(movie.cast, ["Keanu Reeves"]);
    }

    #[test]
    fn provider_name() {
        assert_eq!(gateway(Some("key")).name(), "tmdb");
    }
}
