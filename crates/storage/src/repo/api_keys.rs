use crate::{models::SqlApiKey, Db};
use domain::ApiKey;

impl Db {
    pub async fn insert_api_key(&self, k: &ApiKey) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (key, domain, type, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&k.key)
        .bind(&k.domain)
        .bind(k.key_type.as_str())
        .bind(k.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_api_key(&self, key: &str) -> anyhow::Result<Option<ApiKey>> {
        let row = sqlx::query_as::<_, SqlApiKey>(
            "SELECT key, domain, type AS key_type, created_at FROM api_keys WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ApiKey::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::AuthorType;

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let key = ApiKey {
            key: domain::ident::new_api_key(),
            domain: "x.com".to_string(),
            key_type: AuthorType::default(),
            created_at: Utc::now(),
        };
        db.insert_api_key(&key).await.unwrap();

        let found = db.find_api_key(&key.key).await.unwrap().unwrap();
        assert_eq!(found.domain, "x.com");
        assert_eq!(found.key_type, AuthorType::Default);

        assert!(db.find_api_key("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_keys_are_unique() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let key = ApiKey {
            key: "k".repeat(64),
            domain: "x.com".to_string(),
            key_type: AuthorType::Default,
            created_at: Utc::now(),
        };
        db.insert_api_key(&key).await.unwrap();
        assert!(db.insert_api_key(&key).await.is_err());
    }
}
