use std::sync::Arc;

use storage::CommentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CommentStore>,
    pub master_key: Option<Arc<str>>,
}
