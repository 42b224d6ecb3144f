use async_trait::async_trait;
use domain::{ApiKey, Comment, SiteUrl, Thread};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    Pool, Sqlite,
};
use std::{fs, path::Path, str::FromStr, time::Duration};
mod models;
mod repo;
mod traits;

pub use traits::CommentStore;

#[derive(Clone)]
pub struct Db {
    pub(crate) pool: Pool<Sqlite>,
}
impl Db {
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        let in_memory = db_url.contains(":memory:");
        if db_url.starts_with("sqlite://") && !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://");
            let path = Path::new(path_str);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
        }
        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            Sqlite::create_database(db_url).await?;
        }

        // 级联删除依赖外键约束，必须在每个连接上开启
        let mut options = SqliteConnectOptions::from_str(db_url)?.foreign_keys(true);
        let mut pool_options = SqlitePoolOptions::new();
        if in_memory {
            // 内存库在最后一个连接关闭时即被销毁
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        } else {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("../../migrations").run(&pool).await?;
        tracing::debug!("Database ready: {}", db_url);
        Ok(Self { pool })
    }
}

#[async_trait]
impl CommentStore for Db {
    async fn insert_comment(&self, comment: &Comment) -> anyhow::Result<()> {
        Db::insert_comment(self, comment).await
    }

    async fn get_comment(&self, id: &str) -> anyhow::Result<Option<Comment>> {
        Db::get_comment(self, id).await
    }

    async fn list_threads(&self, site_url: &SiteUrl) -> anyhow::Result<Vec<Thread>> {
        Db::list_threads(self, site_url).await
    }

    async fn update_content(&self, id: &str, content: &str) -> anyhow::Result<bool> {
        Db::update_content(self, id, content).await
    }

    async fn delete_comment(&self, id: &str) -> anyhow::Result<bool> {
        Db::delete_comment(self, id).await
    }

    async fn insert_api_key(&self, key: &ApiKey) -> anyhow::Result<()> {
        Db::insert_api_key(self, key).await
    }

    async fn find_api_key(&self, key: &str) -> anyhow::Result<Option<ApiKey>> {
        Db::find_api_key(self, key).await
    }
}
