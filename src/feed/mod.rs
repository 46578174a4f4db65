// src/feed/mod.rs
pub mod cache;
pub mod source;
pub mod types;

pub use cache::{CachedFeedSource, ResponseCache, DEFAULT_REVALIDATE};
pub use source::{ApiFeedSource, FeedSource};
pub use types::{
    BlogPost, FeedEnvelope, FeedSnapshot, Gallery, GalleryImage, NewsId, NewsItem, Video,
};
