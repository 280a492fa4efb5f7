use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to make credentialed cross-origin requests.
    /// Must match exactly, including scheme and port.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:5174",
        "http://localhost:5173",
        "https://koketso777.github.io",
        "https://koketso777.github.io/cinescout",
        "https://koketso777.github.io/cinescout-backend",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB v3 API key. Overridden by `TMDB_API_KEY` when set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Overridden by `TMDB_BASE_URL` when set.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Per-request upstream timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_timeout() -> u64 {
    10
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout(),
        }
    }
}

impl TmdbConfig {
    /// Returns `true` when a non-empty API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
