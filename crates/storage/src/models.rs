use chrono::{DateTime, Utc};
use domain::{ApiKey, Comment, SiteUrl};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub additional_info: Option<String>, // JSON 文本
    pub author_type: String,
    pub created_at: DateTime<Utc>,
    pub parent_id: Option<String>,
    pub site_url: String,
}

impl TryFrom<SqlComment> for Comment {
    type Error = anyhow::Error;

    fn try_from(sql: SqlComment) -> Result<Self, Self::Error> {
        let additional_info = sql
            .additional_info
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Comment {
            id: sql.id,
            author: sql.author,
            content: sql.content,
            additional_info,
            author_type: sql.author_type.parse()?,
            created_at: sql.created_at,
            parent_id: sql.parent_id,
            site_url: SiteUrl::new_unchecked(sql.site_url),
        })
    }
}

#[derive(FromRow)]
pub struct SqlApiKey {
    pub key: String,
    pub domain: String,
    pub key_type: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SqlApiKey> for ApiKey {
    type Error = anyhow::Error;

    fn try_from(sql: SqlApiKey) -> Result<Self, Self::Error> {
        Ok(ApiKey {
            key: sql.key,
            domain: sql.domain,
            key_type: sql.key_type.parse()?,
            created_at: sql.created_at,
        })
    }
}
