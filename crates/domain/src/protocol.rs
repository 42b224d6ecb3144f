use crate::ident::reply_id;
use crate::models::{AuthorType, Comment, SiteUrl, Thread};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// 列表视图不暴露完整 id 与 parentId，只给 replyId
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyView {
    pub reply_id: String,
    pub author: String,
    pub content: String,
    pub additional_info: Option<Value>,
    #[serde(rename = "type")]
    pub author_type: AuthorType,
    pub created_at: DateTime<Utc>,
    pub site_url: SiteUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub reply_id: String,
    pub author: String,
    pub content: String,
    pub additional_info: Option<Value>,
    #[serde(rename = "type")]
    pub author_type: AuthorType,
    pub created_at: DateTime<Utc>,
    pub site_url: SiteUrl,
    pub replies: Vec<ReplyView>,
}

impl From<Comment> for ReplyView {
    fn from(c: Comment) -> Self {
        ReplyView {
            reply_id: reply_id(&c.id),
            author: c.author,
            content: c.content,
            additional_info: c.additional_info,
            author_type: c.author_type,
            created_at: c.created_at,
            site_url: c.site_url,
        }
    }
}

impl From<Thread> for CommentView {
    fn from(t: Thread) -> Self {
        let c = t.comment;
        CommentView {
            reply_id: reply_id(&c.id),
            author: c.author,
            content: c.content,
            additional_info: c.additional_info,
            author_type: c.author_type,
            created_at: c.created_at,
            site_url: c.site_url,
            replies: t.replies.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: id.to_string(),
            author: "Ferris".to_string(),
            content: "<p>hi</p>".to_string(),
            additional_info: Some(serde_json::json!({ "avatar": "crab.png" })),
            author_type: AuthorType::Default,
            created_at: Utc::now(),
            parent_id: parent.map(str::to_string),
            site_url: SiteUrl::normalize("https://x.com/page"),
        }
    }

    #[test]
    fn test_view_hides_ids() {
        let thread = Thread {
            comment: comment("abcdefghijkl", None),
            replies: vec![comment("zyxwvutsrqpo", Some("abcdefghijkl"))],
        };

        let json = serde_json::to_value(CommentView::from(thread)).unwrap();

        assert_eq!(json["replyId"], "abcdef");
        assert!(json.get("id").is_none());
        assert!(json.get("parentId").is_none());
        assert_eq!(json["additionalInfo"]["avatar"], "crab.png");
        assert_eq!(json["type"], "DEFAULT");

        let reply = &json["replies"][0];
        assert_eq!(reply["replyId"], "zyxwvu");
        assert!(reply.get("id").is_none());
        assert!(reply.get("parentId").is_none());
        assert!(reply.get("replies").is_none());
    }
}
