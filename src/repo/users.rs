use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, name, avatar_url
        FROM news.users
        "#,
    )
    .fetch_all(pool)
    .await
}
