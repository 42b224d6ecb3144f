use anyhow::Result;
use async_trait::async_trait;
use domain::{ApiKey, Comment, SiteUrl, Thread};

// 删除评论时必须连带删除所有层级的回复
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert_comment(&self, comment: &Comment) -> Result<()>;

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>>;

    // 前缀匹配 site_url 的顶层评论，附带直接回复，按时间升序
    async fn list_threads(&self, site_url: &SiteUrl) -> Result<Vec<Thread>>;

    // 返回 false 表示评论不存在
    async fn update_content(&self, id: &str, content: &str) -> Result<bool>;

    async fn delete_comment(&self, id: &str) -> Result<bool>;

    async fn insert_api_key(&self, key: &ApiKey) -> Result<()>;

    async fn find_api_key(&self, key: &str) -> Result<Option<ApiKey>>;
}
