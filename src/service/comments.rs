use sqlx::PgPool;

use super::articles::{ensure_article_exists, parse_id};
use crate::{
    error::{AppError, AppResult},
    model::{CommentOut, NewCommentPayload, VotePayload},
    repo,
};

pub async fn list_for_article(pool: &PgPool, raw_article_id: &str) -> AppResult<Vec<CommentOut>> {
    let article_id = parse_id(raw_article_id)?;

    // An article with no comments is an empty list, not a 404; the 404 comes
    // from the concurrent existence check.
    let (rows, ()) = tokio::try_join!(
        fetch_comments(pool, article_id),
        ensure_article_exists(pool, article_id),
    )?;

    Ok(rows.into_iter().map(comment_row_to_out).collect())
}

pub async fn create(
    pool: &PgPool,
    raw_article_id: &str,
    payload: NewCommentPayload,
) -> AppResult<CommentOut> {
    let article_id = parse_id(raw_article_id)?;

    let NewCommentPayload { username, body } = payload;
    let (Some(username), Some(body)) = (username, body) else {
        return Err(AppError::BadRequest);
    };

    let (row, ()) = tokio::try_join!(
        insert(pool, article_id, &username, &body),
        ensure_article_exists(pool, article_id),
    )?;

    tracing::info!(comment_id = row.comment_id, article_id, "comment created");
    Ok(comment_row_to_out(row))
}

pub async fn update_votes(
    pool: &PgPool,
    raw_id: &str,
    payload: VotePayload,
) -> AppResult<CommentOut> {
    let id = parse_id(raw_id)?;
    let inc_votes = payload.inc_votes.ok_or(AppError::BadRequest)?;

    let (updated, ()) = tokio::try_join!(
        apply_votes(pool, id, inc_votes),
        ensure_comment_exists(pool, id),
    )?;

    let row = updated.ok_or(AppError::NotFound)?;
    tracing::debug!(comment_id = id, inc_votes, votes = row.votes, "comment votes updated");
    Ok(comment_row_to_out(row))
}

pub async fn delete(pool: &PgPool, raw_id: &str) -> AppResult<()> {
    let id = parse_id(raw_id)?;

    let (_, ()) = tokio::try_join!(remove(pool, id), ensure_comment_exists(pool, id))?;

    tracing::info!(comment_id = id, "comment deleted");
    Ok(())
}

async fn ensure_comment_exists(pool: &PgPool, id: i64) -> AppResult<()> {
    if repo::comments::comment_exists(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

async fn fetch_comments(
    pool: &PgPool,
    article_id: i64,
) -> AppResult<Vec<repo::comments::CommentRow>> {
    Ok(repo::comments::list_comments_for_article(pool, article_id).await?)
}

async fn insert(
    pool: &PgPool,
    article_id: i64,
    author: &str,
    body: &str,
) -> AppResult<repo::comments::CommentRow> {
    Ok(repo::comments::insert_comment(pool, article_id, author, body).await?)
}

async fn apply_votes(
    pool: &PgPool,
    id: i64,
    inc_votes: i32,
) -> AppResult<Option<repo::comments::CommentRow>> {
    Ok(repo::comments::update_comment_votes(pool, id, inc_votes).await?)
}

async fn remove(pool: &PgPool, id: i64) -> AppResult<u64> {
    Ok(repo::comments::delete_comment(pool, id).await?)
}

fn comment_row_to_out(row: repo::comments::CommentRow) -> CommentOut {
    CommentOut {
        comment_id: row.comment_id,
        article_id: row.article_id,
        author: row.author,
        body: row.body,
        votes: row.votes,
        created_at: row.created_at.to_rfc3339(),
    }
}
