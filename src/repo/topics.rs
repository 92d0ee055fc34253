use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
pub struct TopicRow {
    pub slug: String,
    pub description: String,
}

pub async fn list_topics(pool: &PgPool) -> Result<Vec<TopicRow>, sqlx::Error> {
    sqlx::query_as::<_, TopicRow>(
        r#"
        SELECT slug, description
        FROM news.topics
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn topic_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM news.topics WHERE slug = $1)
        "#,
    )
    .bind(slug)
    .fetch_one(pool)
    .await
}
