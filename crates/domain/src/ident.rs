use rand::{distributions::Alphanumeric, Rng};

pub const COMMENT_ID_LEN: usize = 12;
pub const API_KEY_LEN: usize = 64;
pub const REPLY_ID_LEN: usize = 6;

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn new_comment_id() -> String {
    random_token(COMMENT_ID_LEN)
}

pub fn new_api_key() -> String {
    random_token(API_KEY_LEN)
}

// 列表中代替完整 id 展示的短标识
pub fn reply_id(comment_id: &str) -> String {
    comment_id.chars().take(REPLY_ID_LEN).collect()
}
