use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    model::{ArticleOut, ArticlesResponse, NewArticlePayload, SortKey, SortOrder, VotePayload},
    repo,
};

// Stored for articles created without an image, so the column is never null.
pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://img-rpba.s3.ap-southeast-2.amazonaws.com/wp-content/uploads/2022/09/21154112/siberianhuskycharacteristics-1024x766.jpg";

#[derive(Debug, PartialEq, Eq)]
pub struct ListOptions {
    pub topic: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub limit: i64,
    pub page: i64,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            topic: None,
            sort: SortKey::CreatedAt,
            order: SortOrder::Desc,
            limit: 10,
            page: 1,
        }
    }
}

/// Normalizes the raw query string for the articles listing, rejecting
/// unrecognized parameter names and out-of-whitelist values before any query
/// is composed.
fn parse_list_query(raw: &str) -> AppResult<ListOptions> {
    let mut options = ListOptions::default();

    for (name, value) in form_urlencoded::parse(raw.as_bytes()) {
        match name.as_ref() {
            // An empty topic value means no filter was supplied.
            "topic" => {
                if !value.is_empty() {
                    options.topic = Some(value.into_owned());
                }
            }
            // Recognized filter name kept for contract compatibility; the
            // listing never filters by author.
            "author" => {}
            "sort_by" => options.sort = SortKey::parse(&value).ok_or(AppError::BadRequest)?,
            "order" => options.order = SortOrder::parse(&value).ok_or(AppError::BadRequest)?,
            "limit" => options.limit = parse_positive(&value)?,
            "p" => options.page = parse_positive(&value)?,
            _ => return Err(AppError::BadRequest),
        }
    }

    Ok(options)
}

fn parse_positive(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(AppError::BadRequest)
}

fn page_offset(limit: i64, page: i64) -> i64 {
    limit * (page - 1)
}

pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>().map_err(|_| AppError::BadRequest)
}

pub async fn list(pool: &PgPool, raw_query: &str) -> AppResult<ArticlesResponse> {
    let options = parse_list_query(raw_query)?;

    let args = repo::articles::ArticleListArgs {
        topic: options.topic.clone(),
        sort: options.sort,
        order: options.order,
        limit: options.limit,
        offset: page_offset(options.limit, options.page),
    };

    // Page, total count, and topic existence settle together; the first
    // failure wins and results from the surviving siblings are dropped.
    let (rows, total, ()) = tokio::try_join!(
        fetch_page(pool, args),
        fetch_total(pool, options.topic.as_deref()),
        ensure_topic_exists(pool, options.topic.as_deref()),
    )?;

    tracing::debug!(total, returned = rows.len(), "articles listing queried");

    Ok(ArticlesResponse {
        articles: rows.into_iter().map(article_row_to_out).collect(),
        total_count: total.to_string(),
    })
}

pub async fn get(pool: &PgPool, raw_id: &str) -> AppResult<ArticleOut> {
    let id = parse_id(raw_id)?;
    let row = repo::articles::select_article_by_id(pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(article_row_to_out(row))
}

pub async fn create(pool: &PgPool, payload: NewArticlePayload) -> AppResult<ArticleOut> {
    let NewArticlePayload {
        author,
        title,
        body,
        topic,
        article_img_url,
    } = payload;

    let (Some(author), Some(title), Some(body), Some(topic)) = (author, title, body, topic) else {
        return Err(AppError::BadRequest);
    };

    let article = repo::articles::NewArticle {
        author,
        title,
        body,
        topic,
        article_img_url: article_img_url
            .unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_string()),
    };

    let id = repo::articles::insert_article(pool, article).await?;
    tracing::info!(article_id = id, "article created");

    // Re-select so the response carries the derived comment_count.
    let row = repo::articles::select_article_by_id(pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(article_row_to_out(row))
}

pub async fn update_votes(
    pool: &PgPool,
    raw_id: &str,
    payload: VotePayload,
) -> AppResult<ArticleOut> {
    let id = parse_id(raw_id)?;
    let inc_votes = payload.inc_votes.ok_or(AppError::BadRequest)?;

    // The update and the existence check run concurrently; a missing article
    // surfaces through the check while the update touches no rows.
    let (updated, ()) = tokio::try_join!(
        apply_votes(pool, id, inc_votes),
        ensure_article_exists(pool, id),
    )?;

    let row = updated.ok_or(AppError::NotFound)?;
    tracing::debug!(article_id = id, inc_votes, votes = row.votes, "article votes updated");
    Ok(base_row_to_out(row))
}

pub async fn delete(pool: &PgPool, raw_id: &str) -> AppResult<()> {
    let id = parse_id(raw_id)?;

    let (_, ()) = tokio::try_join!(remove(pool, id), ensure_article_exists(pool, id))?;

    tracing::info!(article_id = id, "article deleted");
    Ok(())
}

pub(crate) async fn ensure_article_exists(pool: &PgPool, id: i64) -> AppResult<()> {
    if repo::articles::article_exists(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

async fn ensure_topic_exists(pool: &PgPool, topic: Option<&str>) -> AppResult<()> {
    match topic {
        Some(slug) => {
            if repo::topics::topic_exists(pool, slug).await? {
                Ok(())
            } else {
                Err(AppError::NotFound)
            }
        }
        None => Ok(()),
    }
}

async fn fetch_page(
    pool: &PgPool,
    args: repo::articles::ArticleListArgs,
) -> AppResult<Vec<repo::articles::ArticleRow>> {
    Ok(repo::articles::list_articles(pool, args).await?)
}

async fn fetch_total(pool: &PgPool, topic: Option<&str>) -> AppResult<i64> {
    Ok(repo::articles::count_articles(pool, topic).await?)
}

async fn apply_votes(
    pool: &PgPool,
    id: i64,
    inc_votes: i32,
) -> AppResult<Option<repo::articles::ArticleBaseRow>> {
    Ok(repo::articles::update_article_votes(pool, id, inc_votes).await?)
}

async fn remove(pool: &PgPool, id: i64) -> AppResult<u64> {
    Ok(repo::articles::delete_article(pool, id).await?)
}

fn article_row_to_out(row: repo::articles::ArticleRow) -> ArticleOut {
    ArticleOut {
        article_id: row.article_id,
        title: row.title,
        topic: row.topic,
        author: row.author,
        body: row.body,
        created_at: row.created_at.to_rfc3339(),
        votes: row.votes,
        article_img_url: row.article_img_url,
        comment_count: Some(row.comment_count.to_string()),
    }
}

fn base_row_to_out(row: repo::articles::ArticleBaseRow) -> ArticleOut {
    ArticleOut {
        article_id: row.article_id,
        title: row.title,
        topic: row.topic,
        author: row.author,
        body: row.body,
        created_at: row.created_at.to_rfc3339(),
        votes: row.votes,
        article_img_url: row.article_img_url,
        comment_count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_no_parameters_supplied() {
        let options = parse_list_query("").expect("empty query is valid");
        assert_eq!(options, ListOptions::default());
    }

    #[test]
    fn topic_filter_is_captured() {
        let options = parse_list_query("topic=mitch").expect("valid query");
        assert_eq!(options.topic.as_deref(), Some("mitch"));
    }

    #[test]
    fn empty_topic_value_means_no_filter() {
        let options = parse_list_query("topic=").expect("valid query");
        assert_eq!(options.topic, None);
    }

    #[test]
    fn author_is_recognized_but_never_filters() {
        let options = parse_list_query("author=butter_bridge").expect("valid query");
        assert_eq!(options, ListOptions::default());
    }

    #[test]
    fn full_combination_is_normalized() {
        let options =
            parse_list_query("topic=cats&sort_by=votes&order=asc&limit=5&p=3").expect("valid");
        assert_eq!(options.topic.as_deref(), Some("cats"));
        assert_eq!(options.sort, SortKey::Votes);
        assert_eq!(options.order, SortOrder::Asc);
        assert_eq!(options.limit, 5);
        assert_eq!(options.page, 3);
    }

    #[test]
    fn sort_by_outside_whitelist_is_rejected() {
        assert!(matches!(
            parse_list_query("sort_by=pepsi"),
            Err(AppError::BadRequest)
        ));
        assert!(matches!(
            parse_list_query("sort_by=comment_count"),
            Err(AppError::BadRequest)
        ));
    }

    #[test]
    fn order_outside_asc_desc_is_rejected() {
        assert!(matches!(
            parse_list_query("order=sideways"),
            Err(AppError::BadRequest)
        ));
    }

    #[test]
    fn limit_must_be_a_positive_integer() {
        for raw in ["limit=pepsi", "limit=0", "limit=-3", "limit=2.5"] {
            assert!(
                matches!(parse_list_query(raw), Err(AppError::BadRequest)),
                "{raw} should be rejected"
            );
        }
        assert_eq!(parse_list_query("limit=2").expect("valid").limit, 2);
    }

    #[test]
    fn page_must_be_a_positive_integer() {
        for raw in ["p=pepsi", "p=0", "p=-1"] {
            assert!(
                matches!(parse_list_query(raw), Err(AppError::BadRequest)),
                "{raw} should be rejected"
            );
        }
        assert_eq!(parse_list_query("p=4").expect("valid").page, 4);
    }

    #[test]
    fn unknown_parameter_names_are_rejected() {
        for raw in ["banana=1", "sortby=votes", "topic=mitch&banana=1"] {
            assert!(
                matches!(parse_list_query(raw), Err(AppError::BadRequest)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn offset_is_limit_times_preceding_pages() {
        assert_eq!(page_offset(10, 1), 0);
        assert_eq!(page_offset(10, 3), 20);
        assert_eq!(page_offset(7, 2), 7);
    }

    #[test]
    fn path_ids_must_be_numeric() {
        assert_eq!(parse_id("3").expect("numeric"), 3);
        assert_eq!(parse_id("-5").expect("numeric"), -5);
        assert!(matches!(parse_id("pepsi"), Err(AppError::BadRequest)));
        assert!(matches!(parse_id("3b"), Err(AppError::BadRequest)));
    }
}
