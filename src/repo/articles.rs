use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::model::{SortKey, SortOrder};

/// Article row with the comment aggregate attached, as produced by the
/// joined listing and by-id queries.
#[derive(Debug, sqlx::FromRow)]
pub struct ArticleRow {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i64,
}

/// Bare article row returned by mutations, without the aggregate.
#[derive(Debug, sqlx::FromRow)]
pub struct ArticleBaseRow {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
}

pub struct ArticleListArgs {
    pub topic: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub article_img_url: String,
}

const ARTICLE_COLUMNS: &str = r#"articles.article_id,
               articles.title,
               articles.topic,
               articles.author,
               articles.body,
               articles.created_at,
               articles.votes,
               articles.article_img_url"#;

// The sort column and direction are interpolated rather than bound because
// PostgreSQL placeholders cannot stand for identifiers. Both come from the
// closed SortKey/SortOrder enums, never from request text.
fn list_articles_sql(with_topic: bool, sort: SortKey, order: SortOrder) -> String {
    let filter = if with_topic {
        "WHERE articles.topic = $3"
    } else {
        ""
    };

    format!(
        r#"
        SELECT {ARTICLE_COLUMNS},
               COALESCE(COUNT(comments.article_id), 0) AS comment_count
        FROM news.articles AS articles
        LEFT JOIN news.comments AS comments
               ON comments.article_id = articles.article_id
        {filter}
        GROUP BY articles.article_id
        ORDER BY {column} {direction}
        LIMIT $1 OFFSET $2
        "#,
        column = sort.column(),
        direction = order.sql(),
    )
}

fn count_articles_sql(with_topic: bool) -> String {
    let filter = if with_topic {
        "WHERE articles.topic = $1"
    } else {
        ""
    };

    format!(
        r#"
        SELECT COUNT(*)
        FROM news.articles AS articles
        {filter}
        "#,
    )
}

pub async fn list_articles(
    pool: &PgPool,
    args: ArticleListArgs,
) -> Result<Vec<ArticleRow>, sqlx::Error> {
    let sql = list_articles_sql(args.topic.is_some(), args.sort, args.order);

    let mut query = sqlx::query_as::<_, ArticleRow>(&sql)
        .bind(args.limit)
        .bind(args.offset);
    if let Some(topic) = &args.topic {
        query = query.bind(topic);
    }

    query.fetch_all(pool).await
}

pub async fn count_articles(pool: &PgPool, topic: Option<&str>) -> Result<i64, sqlx::Error> {
    let sql = count_articles_sql(topic.is_some());

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    if let Some(topic) = topic {
        query = query.bind(topic);
    }

    query.fetch_one(pool).await
}

pub async fn select_article_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<ArticleRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {ARTICLE_COLUMNS},
               COALESCE(COUNT(comments.article_id), 0) AS comment_count
        FROM news.articles AS articles
        LEFT JOIN news.comments AS comments
               ON comments.article_id = articles.article_id
        WHERE articles.article_id = $1
        GROUP BY articles.article_id
        "#,
    );

    sqlx::query_as::<_, ArticleRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn article_exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM news.articles WHERE article_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn insert_article(pool: &PgPool, article: NewArticle) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO news.articles (author, title, body, topic, article_img_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING article_id
        "#,
    )
    .bind(article.author)
    .bind(article.title)
    .bind(article.body)
    .bind(article.topic)
    .bind(article.article_img_url)
    .fetch_one(pool)
    .await
}

// GREATEST keeps the vote count at the zero floor no matter how large a
// decrement the client sends.
pub async fn update_article_votes(
    pool: &PgPool,
    id: i64,
    inc_votes: i32,
) -> Result<Option<ArticleBaseRow>, sqlx::Error> {
    sqlx::query_as::<_, ArticleBaseRow>(
        r#"
        UPDATE news.articles
        SET votes = GREATEST(votes + $1, 0)
        WHERE article_id = $2
        RETURNING article_id,
                  title,
                  topic,
                  author,
                  body,
                  created_at,
                  votes,
                  article_img_url
        "#,
    )
    .bind(inc_votes)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_article(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM news.articles
        WHERE article_id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_listing_has_no_topic_predicate() {
        let sql = list_articles_sql(false, SortKey::CreatedAt, SortOrder::Desc);
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("LEFT JOIN news.comments"));
        assert!(sql.contains("GROUP BY articles.article_id"));
        assert!(sql.contains("ORDER BY articles.created_at DESC"));
        assert!(sql.contains("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn filtered_listing_binds_topic_as_third_parameter() {
        let sql = list_articles_sql(true, SortKey::Votes, SortOrder::Asc);
        assert!(sql.contains("WHERE articles.topic = $3"));
        assert!(sql.contains("ORDER BY articles.votes ASC"));
    }

    #[test]
    fn order_by_never_carries_raw_input() {
        // Every reachable ORDER BY spelling comes from the two enums.
        for sort in [
            SortKey::ArticleId,
            SortKey::Topic,
            SortKey::Author,
            SortKey::Title,
            SortKey::Votes,
            SortKey::CreatedAt,
        ] {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let sql = list_articles_sql(false, sort, order);
                let clause = format!("ORDER BY {} {}", sort.column(), order.sql());
                assert!(sql.contains(&clause));
            }
        }
    }

    #[test]
    fn count_shares_the_listing_filter_shape() {
        assert!(!count_articles_sql(false).contains("WHERE"));
        assert!(count_articles_sql(true).contains("WHERE articles.topic = $1"));
    }
}
