use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use domain::{ident, ApiKey, AuthorType};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{error::AppError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyQuery {
    pub domain: String,
    pub master_key: String,
}

// 任何失败都伪装成 404，不暴露该接口的存在
pub async fn create_api_key(
    State(state): State<AppState>,
    query: Result<Query<CreateApiKeyQuery>, QueryRejection>,
) -> Result<Json<String>, AppError> {
    issue_key(&state, query).await.map(Json).map_err(|e| {
        match e {
            AppError::Internal(ref cause) => tracing::error!("API key issuance failed: {:?}", cause),
            _ => warn!("Rejected API key issuance request"),
        }
        AppError::NotFound("NOT_FOUND".to_string())
    })
}

async fn issue_key(
    state: &AppState,
    query: Result<Query<CreateApiKeyQuery>, QueryRejection>,
) -> Result<String, AppError> {
    let Query(query) = query?;

    let authorized = state
        .master_key
        .as_deref()
        .is_some_and(|expected| expected == query.master_key);
    if !authorized {
        return Err(AppError::NotFound("invalid master key".to_string()));
    }

    let domain = query.domain.trim();
    if domain.is_empty() {
        return Err(AppError::BadRequest("domain must have a value".to_string()));
    }

    let api_key = ApiKey {
        key: ident::new_api_key(),
        domain: domain.to_string(),
        key_type: AuthorType::Default,
        created_at: Utc::now(),
    };
    state.store.insert_api_key(&api_key).await?;

    info!("API key issued for domain={}", api_key.domain);
    Ok(api_key.key)
}
