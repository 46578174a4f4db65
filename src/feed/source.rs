// src/feed/source.rs
use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::{counter, histogram};

use crate::error::FetchError;
use crate::feed::types::{FeedEnvelope, FeedSnapshot};

/// Capability every page depends on: "give me the current feed".
///
/// One successful call is the complete snapshot for all projections of a
/// request. Implementations do not retry; a failure is terminal for that
/// render.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn get_feed_snapshot(&self) -> Result<FeedSnapshot, FetchError>;

    /// Cache key / diagnostics label (usually the upstream URL).
    fn endpoint(&self) -> &str;
}

/// Upstream `getnewslist` client.
pub struct ApiFeedSource {
    mode: Mode,
}

enum Mode {
    /// Canned upstream body, decoded on every call.
    Fixture { body: String, label: String },
    Http { url: String, client: reqwest::Client },
}

impl ApiFeedSource {
    /// Serve a fixed upstream JSON body instead of calling the network.
    pub fn from_fixture_str(body: &str) -> Self {
        Self {
            mode: Mode::Fixture {
                body: body.to_string(),
                label: "fixture".to_string(),
            },
        }
    }

    /// Real HTTP source. Timeouts only guard against a hung upstream; there are no retries.
    pub fn from_url(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coffee-digest/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            mode: Mode::Http {
                url: url.into(),
                client,
            },
        })
    }

    fn decode(body: &str) -> Result<FeedSnapshot, FetchError> {
        let envelope = FeedEnvelope::from_upstream_json(body)?;
        Ok(FeedSnapshot::new(envelope))
    }

    async fn fetch_http(url: &str, client: &reqwest::Client) -> Result<FeedSnapshot, FetchError> {
        let resp = client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        Self::decode(&body)
    }
}

#[async_trait]
impl FeedSource for ApiFeedSource {
    async fn get_feed_snapshot(&self) -> Result<FeedSnapshot, FetchError> {
        let t0 = Instant::now();
        let res = match &self.mode {
            Mode::Fixture { body, .. } => Self::decode(body),
            Mode::Http { url, client } => Self::fetch_http(url, client).await,
        };

        counter!("feed_fetch_total").increment(1);
        histogram!("feed_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        match &res {
            Ok(snap) => tracing::info!(
                target: "feed",
                endpoint = self.endpoint(),
                news = snap.news().len(),
                blogs = snap.blogs().len(),
                "feed fetched"
            ),
            Err(e) => {
                counter!("feed_fetch_errors_total", "kind" => e.kind()).increment(1);
                tracing::warn!(
                    target: "feed",
                    endpoint = self.endpoint(),
                    error = %e,
                    "feed fetch failed"
                );
            }
        }
        res
    }

    fn endpoint(&self) -> &str {
        match &self.mode {
            Mode::Fixture { label, .. } => label,
            Mode::Http { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_source_decodes_envelope() {
        let src = ApiFeedSource::from_fixture_str(
            r#"{"data":{"news":[{"news_Id":1,"slug":"a","categrory_Name":"World","insert_Date":"2024-01-02"}]}}"#,
        );
        let snap = src.get_feed_snapshot().await.unwrap();
        assert_eq!(snap.news().len(), 1);
        assert_eq!(snap.news()[0].slug, "a");
        assert_eq!(src.endpoint(), "fixture");
    }

    #[tokio::test]
    async fn broken_fixture_is_decode_error() {
        let src = ApiFeedSource::from_fixture_str("<html>502</html>");
        let err = src.get_feed_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        // Port 9 (discard) on localhost is closed in CI sandboxes.
        let src = ApiFeedSource::from_url("http://127.0.0.1:9/WebAPI/getnewslist").unwrap();
        let err = src.get_feed_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    }
}
