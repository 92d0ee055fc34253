use axum::{extract::State, Json};

use crate::{
    app::AppState,
    error::AppResult,
    model::{TopicOut, TopicsResponse},
    repo,
};

pub async fn list_topics(State(state): State<AppState>) -> AppResult<Json<TopicsResponse>> {
    let rows = repo::topics::list_topics(&state.pool).await?;
    let topics = rows
        .into_iter()
        .map(|row| TopicOut {
            slug: row.slug,
            description: row.description,
        })
        .collect();
    Ok(Json(TopicsResponse { topics }))
}
