use axum::{extract::State, Json};

use crate::{
    app::AppState,
    error::AppResult,
    model::{UserOut, UsersResponse},
    repo,
};

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let rows = repo::users::list_users(&state.pool).await?;
    let users = rows
        .into_iter()
        .map(|row| UserOut {
            username: row.username,
            name: row.name,
            avatar_url: row.avatar_url,
        })
        .collect();
    Ok(Json(UsersResponse { users }))
}
