use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header::ORIGIN, HeaderMap},
    Json,
};
use chrono::Utc;
use domain::{content, ident, protocol::CommentView, AuthorType, Comment, SiteUrl, DEFAULT_AUTHOR};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::lookup_api_key;
use crate::{error::AppError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub author: Option<String>,
    pub content: String,
    pub site_url: Option<String>,
    pub parent_id: Option<String>,
    pub additional_info: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentQuery {
    #[serde(default)]
    pub parse_markdown: bool,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct EditCommentRequest {
    pub id: String,
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentQuery {
    #[serde(default)]
    pub parse_markdown: bool,
}

#[derive(Deserialize)]
pub struct DeleteCommentQuery {
    pub id: String,
}

// 优先使用 body 中的 siteUrl，其次是 Origin 头
fn resolve_site_url<'a>(site_url: Option<&'a str>, origin: Option<&'a str>) -> Option<&'a str> {
    site_url
        .filter(|s| !s.trim().is_empty())
        .or_else(|| origin.filter(|s| !s.trim().is_empty()))
}

fn require_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::BadRequest("content must not be empty".to_string()));
    }
    Ok(())
}

pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<CreateCommentQuery>, QueryRejection>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<Json<String>, AppError> {
    let Query(query) = query?;
    let Json(payload) = payload?;

    let origin = headers.get(ORIGIN).and_then(|h| h.to_str().ok());
    let raw_url = resolve_site_url(payload.site_url.as_deref(), origin)
        .ok_or_else(|| AppError::BadRequest("siteUrl must have a value".to_string()))?;
    require_content(&payload.content)?;

    let author_type = match lookup_api_key(&state, query.api_key.as_deref()).await? {
        Some(_) => AuthorType::Webmaster,
        None => AuthorType::Default,
    };

    let parent_id = payload.parent_id.filter(|p| !p.is_empty());
    if let Some(ref pid) = parent_id {
        if state.store.get_comment(pid).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "parentId does not reference an existing comment: {}",
                pid
            )));
        }
    }

    let author = payload
        .author
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let comment = Comment {
        id: ident::new_comment_id(),
        author,
        content: content::render(&payload.content, query.parse_markdown),
        additional_info: payload.additional_info,
        author_type,
        created_at: Utc::now(),
        parent_id,
        site_url: SiteUrl::normalize(raw_url),
    };

    state.store.insert_comment(&comment).await?;

    info!(
        "Comment created: id={} site={} type={}",
        comment.id, comment.site_url, comment.author_type
    );
    Ok(Json(comment.id))
}

pub async fn list_comments(
    State(state): State<AppState>,
    query: Result<Query<ListCommentsQuery>, QueryRejection>,
) -> Result<Json<Vec<CommentView>>, AppError> {
    let Query(query) = query?;

    let url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("url must be defined".to_string()))?;
    if Url::parse(&url).is_err() {
        return Err(AppError::BadRequest("url must be a valid URL".to_string()));
    }

    // 持有 API Key 的调用方目前看到的内容与匿名用户相同
    let key = lookup_api_key(&state, query.api_key.as_deref()).await?;
    let site_url = SiteUrl::normalize(&url);
    debug!(
        "Listing comments: site={} privileged={}",
        site_url,
        key.is_some()
    );

    let threads = state.store.list_threads(&site_url).await?;
    Ok(Json(threads.into_iter().map(Into::into).collect()))
}

pub async fn edit_comment(
    State(state): State<AppState>,
    query: Result<Query<EditCommentQuery>, QueryRejection>,
    payload: Result<Json<EditCommentRequest>, JsonRejection>,
) -> Result<Json<String>, AppError> {
    let Query(query) = query?;
    let Json(payload) = payload?;
    require_content(&payload.content)?;

    let rendered = content::render(&payload.content, query.parse_markdown);
    if !state.store.update_content(&payload.id, &rendered).await? {
        return Err(AppError::comment_not_found());
    }

    info!("Comment edited: id={}", payload.id);
    Ok(Json(payload.id))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    query: Result<Query<DeleteCommentQuery>, QueryRejection>,
) -> Result<Json<String>, AppError> {
    let Query(query) = query?;

    if !state.store.delete_comment(&query.id).await? {
        return Err(AppError::comment_not_found());
    }

    info!("Comment deleted (with replies): id={}", query.id);
    Ok(Json(query.id))
}
