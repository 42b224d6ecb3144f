pub mod api_keys;
pub mod comments;

use domain::ApiKey;

use crate::{error::AppError, state::AppState};

async fn lookup_api_key(state: &AppState, key: Option<&str>) -> Result<Option<ApiKey>, AppError> {
    match key.filter(|k| !k.is_empty()) {
        Some(k) => Ok(state.store.find_api_key(k).await?),
        None => Ok(None),
    }
}
