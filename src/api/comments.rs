use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    app::AppState,
    error::AppResult,
    model::{CommentResponse, CommentsResponse, NewCommentPayload, VotePayload},
    service,
};

pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> AppResult<Json<CommentsResponse>> {
    let comments = service::comments::list_for_article(&state.pool, &article_id).await?;
    Ok(Json(CommentsResponse { comments }))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Json(payload): Json<NewCommentPayload>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let comment = service::comments::create(&state.pool, &article_id, payload).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

pub async fn update_comment_votes(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(payload): Json<VotePayload>,
) -> AppResult<Json<CommentResponse>> {
    let comment = service::comments::update_votes(&state.pool, &comment_id, payload).await?;
    Ok(Json(CommentResponse { comment }))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<StatusCode> {
    service::comments::delete(&state.pool, &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
