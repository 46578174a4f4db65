// src/feed/types.rs
//! Wire types of the upstream `getnewslist` envelope.
//!
//! Field names follow the upstream JSON verbatim (including its
//! `categrory_Name` spelling). Upstream sends `null` for missing text
//! fields often enough that every string tolerates it.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Opaque item id. Upstream sends numbers for some sites and strings for others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NewsId(pub String);

impl<'de> Deserialize<'de> for NewsId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }
        let id = match Option::<Raw>::deserialize(d)? {
            Some(Raw::Int(n)) => n.to_string(),
            Some(Raw::Float(f)) => f.to_string(),
            Some(Raw::Text(s)) => s,
            None => String::new(),
        };
        Ok(NewsId(id))
    }
}

impl std::fmt::Display for NewsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One news article as supplied by the upstream API. Never mutated locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(rename = "news_Id", default)]
    pub id: NewsId,
    #[serde(rename = "news_Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    /// HTML body.
    #[serde(rename = "news_Content", default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Optional HTML teaser.
    #[serde(rename = "news_Summary", default)]
    pub summary: Option<String>,
    /// Free-text category display name.
    #[serde(rename = "categrory_Name", default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Possibly relative; see [`crate::normalize::normalize_image`].
    #[serde(rename = "image", default)]
    pub image_url: Option<String>,
    #[serde(rename = "news_Source", default)]
    pub source: Option<String>,
    /// Raw timestamp string; parsed lazily with [`crate::normalize::parse_timestamp`].
    #[serde(rename = "insert_Date", default, deserialize_with = "null_as_default")]
    pub published_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(rename = "blog_Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "blog_Summary", default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(rename = "blog_Content", default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(rename = "fileName", default, deserialize_with = "null_as_default")]
    pub file_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(rename = "galleryMaster_id", default)]
    pub id: NewsId,
    #[serde(rename = "galleryMaster_Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "galleryDetailList", default, deserialize_with = "null_as_default")]
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "videoDetail_id", default)]
    pub id: NewsId,
    #[serde(rename = "videoTitle", default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Embeddable player URL.
    #[serde(rename = "fileName", default, deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(rename = "insert_Date", default, deserialize_with = "null_as_default")]
    pub published_at: String,
}

/// Contents of the upstream `data` object. Absent arrays decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: Vec<NewsItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blogs: Vec<BlogPost>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub galleries: Vec<Gallery>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<Video>,
}

/// Top-level upstream response: `{ "data": { ... } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: FeedEnvelope,
}

impl FeedEnvelope {
    /// Decode an upstream response body.
    pub fn from_upstream_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<UpstreamResponse>(body).map(|r| r.data)
    }
}

/// Immutable, cheap-to-clone view of one successful fetch.
///
/// Every projection for a request reads from the same snapshot; a fresh one
/// only appears after the next fetch/revalidation.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot(Arc<FeedEnvelope>);

impl FeedSnapshot {
    pub fn new(envelope: FeedEnvelope) -> Self {
        Self(Arc::new(envelope))
    }

    pub fn news(&self) -> &[NewsItem] {
        &self.0.news
    }

    pub fn blogs(&self) -> &[BlogPost] {
        &self.0.blogs
    }

    pub fn galleries(&self) -> &[Gallery] {
        &self.0.galleries
    }

    pub fn videos(&self) -> &[Video] {
        &self.0.videos
    }

    /// True when both handles point at the very same fetch.
    pub fn same_fetch(&self, other: &FeedSnapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<FeedEnvelope> for FeedSnapshot {
    fn from(envelope: FeedEnvelope) -> Self {
        Self::new(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_names_and_nulls() {
        let body = r#"{
            "data": {
                "news": [{
                    "news_Id": 17,
                    "news_Title": "Beans up",
                    "news_Content": "<p>Prices rise</p>",
                    "categrory_Name": "Business",
                    "slug": "beans-up",
                    "image": null,
                    "news_Source": "Wire",
                    "insert_Date": "2024-01-02T08:00:00"
                }, {
                    "news_Id": "x-2",
                    "news_Title": null,
                    "slug": "second"
                }],
                "blogs": null
            }
        }"#;
        let env = FeedEnvelope::from_upstream_json(body).unwrap();
        assert_eq!(env.news.len(), 2);
        assert_eq!(env.news[0].id, NewsId("17".into()));
        assert_eq!(env.news[0].category, "Business");
        assert_eq!(env.news[0].image_url, None);
        assert_eq!(env.news[1].id.to_string(), "x-2");
        assert_eq!(env.news[1].title, "");
        assert!(env.blogs.is_empty());
        assert!(env.galleries.is_empty());
    }

    #[test]
    fn missing_data_is_empty_envelope() {
        let env = FeedEnvelope::from_upstream_json(r#"{"status":"ok"}"#).unwrap();
        assert_eq!(env, FeedEnvelope::default());
    }

    #[test]
    fn gallery_and_video_shapes() {
        let body = r#"{"data":{
            "galleries":[{"galleryMaster_id":3,"galleryMaster_Title":"Harvest",
                          "galleryDetailList":[{"fileName":"https://i/1.jpg"},{"fileName":"https://i/2.jpg"}]}],
            "videos":[{"videoDetail_id":9,"videoTitle":"Roasting","fileName":"https://v/embed/1","insert_Date":"2024-02-01"}]
        }}"#;
        let env = FeedEnvelope::from_upstream_json(body).unwrap();
        assert_eq!(env.galleries[0].images.len(), 2);
        assert_eq!(env.videos[0].title, "Roasting");
    }

    #[test]
    fn snapshot_clones_share_the_fetch() {
        let a = FeedSnapshot::new(FeedEnvelope::default());
        let b = a.clone();
        let c = FeedSnapshot::new(FeedEnvelope::default());
        assert!(a.same_fetch(&b));
        assert!(!a.same_fetch(&c));
    }
}
