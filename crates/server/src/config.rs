use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "REMARKS_";

// 未加前缀的常用变量，与部署平台惯例保持一致
const BARE_ENV_KEYS: [(&str, &str); 4] = [
    ("DATABASE_URL", "database.url"),
    ("MASTER_KEY", "security.master_key"),
    ("HOST", "server.host"),
    ("PORT", "server.port"),
];

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub security: SecuritySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone, Default)]
pub struct SecuritySettings {
    // 未设置时无法签发 API Key
    pub master_key: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = map_env_vars(std::env::vars());
        let env_json = serde_json::to_string(&env_map)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize env: {}", e)))?;

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/remarks.db")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }
}

// REMARKS_SERVER__PORT -> server.port；带前缀的变量优先
fn map_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    let mut bare = HashMap::new();
    let mut prefixed = HashMap::new();

    for (k, v) in vars {
        if let Some(rest) = k.strip_prefix(ENV_PREFIX) {
            prefixed.insert(rest.replace("__", ".").to_lowercase(), v);
        } else if let Some((_, path)) = BARE_ENV_KEYS.iter().find(|(name, _)| *name == k) {
            bare.insert(path.to_string(), v);
        }
    }

    bare.extend(prefixed);
    bare
}
