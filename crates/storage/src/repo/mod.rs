mod api_keys;
mod comments;
