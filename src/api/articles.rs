use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    Json,
};

use crate::{
    app::AppState,
    error::AppResult,
    model::{ArticleResponse, ArticlesResponse, NewArticlePayload, VotePayload},
    service,
};

pub async fn list_articles(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<ArticlesResponse>> {
    let page = service::articles::list(&state.pool, query.as_deref().unwrap_or_default()).await?;
    Ok(Json(page))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<Json<ArticleResponse>> {
    let article = service::articles::get(&state.pool, &article_id).await?;
    Ok(Json(ArticleResponse { article }))
}

pub async fn create_article(
    State(state): State<AppState>,
    Json(payload): Json<NewArticlePayload>,
) -> AppResult<(StatusCode, Json<ArticleResponse>)> {
    let article = service::articles::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(ArticleResponse { article })))
}

pub async fn update_article_votes(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Json(payload): Json<VotePayload>,
) -> AppResult<Json<ArticleResponse>> {
    let article = service::articles::update_votes(&state.pool, &article_id, payload).await?;
    Ok(Json(ArticleResponse { article }))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<StatusCode> {
    service::articles::delete(&state.pool, &article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
