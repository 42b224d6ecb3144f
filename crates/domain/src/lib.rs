pub mod content;
pub mod ident;
mod models;
pub mod protocol;

pub use models::{ApiKey, AuthorType, Comment, SiteUrl, Thread, UnknownAuthorType, DEFAULT_AUTHOR};
