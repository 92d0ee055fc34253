use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ArticleOut {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: String,
    pub votes: i32,
    pub article_img_url: String,
    // Derived from the comments table at query time; vote updates return the
    // bare article row without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicOut {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Serialize)]
pub struct CommentOut {
    pub comment_id: i64,
    pub article_id: i64,
    pub author: String,
    pub body: String,
    pub votes: i32,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleOut>,
    pub total_count: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: ArticleOut,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<TopicOut>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserOut>,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentOut>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: CommentOut,
}

// Required fields are modelled as Option so a missing field surfaces as the
// API's own bad-request body instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct NewArticlePayload {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewCommentPayload {
    pub username: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VotePayload {
    pub inc_votes: Option<i32>,
}

/// Sortable columns for the articles listing. ORDER BY identifiers cannot be
/// bound as statement parameters, so only the fixed spellings below are ever
/// interpolated into query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ArticleId,
    Topic,
    Author,
    Title,
    Votes,
    CreatedAt,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "article_id" => Some(Self::ArticleId),
            "topic" => Some(Self::Topic),
            "author" => Some(Self::Author),
            "title" => Some(Self::Title),
            "votes" => Some(Self::Votes),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::ArticleId => "articles.article_id",
            Self::Topic => "articles.topic",
            Self::Author => "articles.author",
            Self::Title => "articles.title",
            Self::Votes => "articles.votes",
            Self::CreatedAt => "articles.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_accepts_only_whitelisted_fields() {
        for raw in ["article_id", "topic", "author", "title", "votes", "created_at"] {
            assert!(SortKey::parse(raw).is_some(), "{raw} should parse");
        }
        assert_eq!(SortKey::parse("pepsi"), None);
        assert_eq!(SortKey::parse("comment_count"), None);
        assert_eq!(SortKey::parse("CREATED_AT"), None);
        assert_eq!(SortKey::parse("created_at; DROP TABLE news.articles"), None);
    }

    #[test]
    fn sort_key_columns_are_schema_qualified() {
        assert_eq!(SortKey::Votes.column(), "articles.votes");
        assert_eq!(SortKey::CreatedAt.column(), "articles.created_at");
    }

    #[test]
    fn sort_order_accepts_only_asc_and_desc() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("descending"), None);
        assert_eq!(SortOrder::parse("DESC"), None);
    }
}
