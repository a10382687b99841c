//! Blog retrieval: HTTP fetch and article text extraction.

mod extract;
mod fetcher;

pub use extract::extract_blog_text;
pub use fetcher::BlogFetcher;
