use std::collections::HashMap;

use crate::{models::SqlComment, Db};
use domain::{Comment, SiteUrl, Thread};

// 存储的 site_url 含 %XX，需转义 LIKE 通配符
fn like_prefix(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 1);
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl Db {
    pub async fn insert_comment(&self, c: &Comment) -> anyhow::Result<()> {
        let additional_info = c
            .additional_info
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO comments (
                id, author, content, additional_info,
                type, created_at, parent_id, site_url
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&c.id)
        .bind(&c.author)
        .bind(&c.content)
        .bind(additional_info)
        .bind(c.author_type.as_str())
        .bind(c.created_at)
        .bind(&c.parent_id)
        .bind(c.site_url.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_comment(&self, comment_id: &str) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT
                id, author, content, additional_info,
                type AS author_type, created_at, parent_id, site_url
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Comment::try_from).transpose()
    }

    pub async fn list_threads(&self, site_url: &SiteUrl) -> anyhow::Result<Vec<Thread>> {
        let pattern = like_prefix(site_url.as_str());

        let top_level = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT
                id, author, content, additional_info,
                type AS author_type, created_at, parent_id, site_url
            FROM comments
            WHERE parent_id IS NULL AND site_url LIKE ? ESCAPE '\'
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        // 只加载一层回复
        let replies = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT
                c.id, c.author, c.content, c.additional_info,
                c.type AS author_type, c.created_at, c.parent_id, c.site_url
            FROM comments c
            JOIN comments p ON c.parent_id = p.id
            WHERE p.parent_id IS NULL AND p.site_url LIKE ? ESCAPE '\'
            ORDER BY c.created_at ASC, c.rowid ASC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        let mut by_parent: HashMap<String, Vec<Comment>> = HashMap::new();
        for row in replies {
            let reply = Comment::try_from(row)?;
            if let Some(parent_id) = reply.parent_id.clone() {
                by_parent.entry(parent_id).or_default().push(reply);
            }
        }

        top_level
            .into_iter()
            .map(|row| {
                let comment = Comment::try_from(row)?;
                let replies = by_parent.remove(&comment.id).unwrap_or_default();
                Ok(Thread { comment, replies })
            })
            .collect()
    }

    pub async fn update_content(&self, id: &str, content: &str) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE comments SET content = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // 回复由 ON DELETE CASCADE 一并删除
    pub async fn delete_comment(&self, id: &str) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
