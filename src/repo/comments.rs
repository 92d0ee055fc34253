use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
pub struct CommentRow {
    pub comment_id: i64,
    pub article_id: i64,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

pub async fn list_comments_for_article(
    pool: &PgPool,
    article_id: i64,
) -> Result<Vec<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT comment_id, article_id, author, body, votes, created_at
        FROM news.comments
        WHERE article_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_comment(
    pool: &PgPool,
    article_id: i64,
    author: &str,
    body: &str,
) -> Result<CommentRow, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO news.comments (article_id, author, body)
        VALUES ($1, $2, $3)
        RETURNING comment_id, article_id, author, body, votes, created_at
        "#,
    )
    .bind(article_id)
    .bind(author)
    .bind(body)
    .fetch_one(pool)
    .await
}

pub async fn update_comment_votes(
    pool: &PgPool,
    id: i64,
    inc_votes: i32,
) -> Result<Option<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        UPDATE news.comments
        SET votes = GREATEST(votes + $1, 0)
        WHERE comment_id = $2
        RETURNING comment_id, article_id, author, body, votes, created_at
        "#,
    )
    .bind(inc_votes)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM news.comments
        WHERE comment_id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn comment_exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM news.comments WHERE comment_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}
