//! Gateway error taxonomy.

/// Convenience alias for gateway results.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures produced while talking to the upstream provider.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The upstream credential was never configured.
    #[error("TMDB_API_KEY not configured")]
    Configuration,

    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Connect, timeout, or read failure talking to upstream.
    ///
    /// The request URL is stripped because its query string carries the
    /// API key.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered 2xx with a body we could not understand.
    #[error("failed to decode upstream {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

impl GatewayError {
    /// HTTP status the caller should see for this error.
    ///
    /// Upstream statuses are passed through verbatim; anything that is not a
    /// valid HTTP status code degrades to 502.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Configuration => 500,
            Self::Upstream { status, .. } if (100..=999).contains(status) => *status,
            Self::Upstream { .. } | Self::Transport(_) | Self::Decode { .. } => 502,
        }
    }

    /// Caller-facing detail text.
    ///
    /// For upstream failures this is the raw upstream body, unmodified.
    pub fn detail(&self) -> String {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}
