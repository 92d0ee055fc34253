use sqlx::{Executor, PgPool};

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    tx.execute(
        r#"
        CREATE SCHEMA IF NOT EXISTS news;
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS news.topics (
          slug          TEXT PRIMARY KEY,
          description   TEXT NOT NULL
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS news.users (
          username      TEXT PRIMARY KEY,
          name          TEXT NOT NULL,
          avatar_url    TEXT NOT NULL
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS news.articles (
          article_id       BIGSERIAL PRIMARY KEY,
          title            TEXT NOT NULL,
          topic            TEXT NOT NULL REFERENCES news.topics(slug),
          author           TEXT NOT NULL REFERENCES news.users(username),
          body             TEXT NOT NULL,
          created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
          votes            INTEGER NOT NULL DEFAULT 0,
          article_img_url  TEXT NOT NULL
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS news.comments (
          comment_id    BIGSERIAL PRIMARY KEY,
          article_id    BIGINT NOT NULL REFERENCES news.articles(article_id) ON DELETE CASCADE,
          author        TEXT NOT NULL REFERENCES news.users(username),
          body          TEXT NOT NULL,
          votes         INTEGER NOT NULL DEFAULT 0,
          created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_articles_topic      ON news.articles(topic);
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_articles_created_at ON news.articles(created_at DESC);
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_comments_article_id ON news.comments(article_id);
        "#,
    )
    .await?;

    tx.commit().await?;
    Ok(())
}
