use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// 与 encodeURIComponent 保持一致：字母数字与 -_.!~*'() 不转义
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// 页面标识：去掉末尾所有 '/'，再做 URI 组件编码
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteUrl(String);

impl SiteUrl {
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim_end_matches('/');
        Self(utf8_percent_encode(trimmed, URI_COMPONENT).to_string())
    }

    // 从数据库读出的值已经是规范化形式
    pub fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorType {
    #[default]
    Default,
    Moderator,
    Webmaster,
}

impl AuthorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorType::Default => "DEFAULT",
            AuthorType::Moderator => "MODERATOR",
            AuthorType::Webmaster => "WEBMASTER",
        }
    }
}

impl fmt::Display for AuthorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown author type: {0}")]
pub struct UnknownAuthorType(pub String);

impl FromStr for AuthorType {
    type Err = UnknownAuthorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(AuthorType::Default),
            "MODERATOR" => Ok(AuthorType::Moderator),
            "WEBMASTER" => Ok(AuthorType::Webmaster),
            other => Err(UnknownAuthorType(other.to_string())),
        }
    }
}

pub const DEFAULT_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub additional_info: Option<Value>,
    #[serde(rename = "type")]
    pub author_type: AuthorType,
    pub created_at: DateTime<Utc>,
    pub parent_id: Option<String>,
    pub site_url: SiteUrl,
}

// 顶层评论及其直接回复
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub key: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub key_type: AuthorType,
    pub created_at: DateTime<Utc>,
}
