use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch},
    Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{api, config::AppConfig, error::AppError, middleware, repo};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

pub async fn build_router(config: &AppConfig) -> anyhow::Result<Router> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.db.url)
        .await?;

    repo::migrations::ensure_schema(&pool).await?;

    Ok(router(pool))
}

pub fn router(pool: PgPool) -> Router {
    let state = AppState { pool };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let api = Router::new()
        .route("/", get(api::docs::list_endpoints))
        .route("/healthz", get(api::health::health_check))
        .route("/topics", get(api::topics::list_topics))
        .route("/users", get(api::users::list_users))
        .route(
            "/articles",
            get(api::articles::list_articles).post(api::articles::create_article),
        )
        .route(
            "/articles/:article_id",
            get(api::articles::get_article)
                .patch(api::articles::update_article_votes)
                .delete(api::articles::delete_article),
        )
        .route(
            "/articles/:article_id/comments",
            get(api::comments::list_comments).post(api::comments::create_comment),
        )
        .route(
            "/comments/:comment_id",
            patch(api::comments::update_comment_votes).delete(api::comments::delete_comment),
        );

    Router::new()
        .nest("/api", api)
        .fallback(unmatched_route)
        .layer(axum_middleware::from_fn(middleware::assign_trace_id))
        .layer(layers)
        .with_state(state)
}

// Unmatched paths get the API's own 404 body instead of an empty response.
async fn unmatched_route() -> AppError {
    AppError::NotFound
}
