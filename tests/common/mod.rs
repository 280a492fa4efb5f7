//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which pairs a [`wiremock::MockServer`] standing in
//! for TMDB with an [`AppContext`] pointed at it. The [`with_server`]
//! constructor additionally starts Axum on a random port for HTTP-level
//! testing.
//!
//! [`with_server`]: TestHarness::with_server

#![allow(dead_code)]

use std::net::SocketAddr;

use cinescout::config::Config;
use cinescout::gateway::TmdbGateway;
use cinescout::server::{create_router, AppContext};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-key";

/// Test harness wrapping a mocked upstream and an [`AppContext`] aimed at it.
pub struct TestHarness {
    pub upstream: MockServer,
    pub ctx: AppContext,
}

impl TestHarness {
    /// Harness with a configured API key.
    pub async fn new() -> Self {
        Self::with_api_key(Some(TEST_API_KEY)).await
    }

    /// Harness with an arbitrary (possibly missing) API key.
    pub async fn with_api_key(api_key: Option<&str>) -> Self {
        Self::with_config(|config| config.tmdb.api_key = api_key.map(String::from)).await
    }

    /// Harness whose config is adjusted by `tweak` after the upstream URL is set.
    pub async fn with_config(tweak: impl FnOnce(&mut Config)) -> Self {
        let upstream = MockServer::start().await;
        let mut config = test_config(&upstream);
        tweak(&mut config);
        let ctx = AppContext::from_config(config).expect("failed to build context");
        Self { upstream, ctx }
    }

    /// A bare gateway sharing this harness's config.
    pub fn gateway(&self) -> TmdbGateway {
        TmdbGateway::new(&self.ctx.config.tmdb).expect("failed to build gateway")
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// Default config with the TMDB base URL pointed at `upstream`.
pub fn test_config(upstream: &MockServer) -> Config {
    let mut config = Config::default();
    config.tmdb.base_url = upstream.uri();
    config.tmdb.api_key = Some(TEST_API_KEY.to_string());
    config.tmdb.timeout_secs = 1;
    config
}
