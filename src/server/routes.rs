use crate::gateway::{MovieDetail, SearchResultPage, ServiceStatus};
use crate::server::error::ApiError;
use crate::server::AppContext;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Deserialize;

pub fn movie_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(root))
        .route("/search", get(search))
        .route("/movie/:movie_id", get(movie_detail))
}

async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus::available())
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    #[serde(default = "default_page")]
    page: i64,
}

fn default_page() -> i64 {
    1
}

async fn search(
    State(ctx): State<AppContext>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResultPage>, ApiError> {
    let Query(params) = query?;
    tracing::debug!(q = %params.q, page = params.page, "Movie search");

    let page = ctx.provider.search(&params.q, params.page).await?;
    Ok(Json(page))
}

async fn movie_detail(
    State(ctx): State<AppContext>,
    movie_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MovieDetail>, ApiError> {
    let Path(movie_id) = movie_id?;
    tracing::debug!(movie_id, "Movie detail");

    let detail = ctx.provider.movie_detail(movie_id).await?;
    Ok(Json(detail))
}
