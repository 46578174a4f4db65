// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod normalize;
pub mod projection;
pub mod render;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::SiteConfig;
pub use crate::error::FetchError;
pub use crate::feed::{FeedSnapshot, FeedSource, NewsItem};

use tracing::info;

/// `/metrics` is only mounted when `DEBUG_ROUTES=1`.
pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";

fn debug_routes_enabled() -> bool {
    std::env::var(ENV_DEBUG_ROUTES).ok().as_deref() == Some("1")
}

/// Build the full in-process app from `config/site.toml` + env: upstream
/// client, response cache, page routes and (optionally) `/metrics`.
pub async fn app() -> anyhow::Result<axum::Router> {
    let cfg = SiteConfig::load_default()?;
    info!(
        target: "config",
        api_url = %cfg.api_url,
        image_origin = %cfg.image_origin,
        revalidate_secs = cfg.revalidate_secs,
        page_size = cfg.page_size,
        "site config loaded"
    );

    let revalidate_secs = cfg.revalidate_secs;
    let state = AppState::from_config(cfg)?;
    let mut app = router(state);

    if debug_routes_enabled() {
        if let Some(m) = metrics::Metrics::init(revalidate_secs) {
            app = app.merge(m.router());
        }
    }
    Ok(app)
}
