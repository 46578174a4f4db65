use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use maud::Markup;
use metrics::counter;
use tower_http::cors::CorsLayer;

use crate::config::SiteConfig;
use crate::error::FetchError;
use crate::feed::{ApiFeedSource, CachedFeedSource, FeedSnapshot, FeedSource, ResponseCache};
use crate::normalize::distinct_categories;
use crate::projection;
use crate::render::{self, pages, RenderCtx};

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<dyn FeedSource>,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(feed: Arc<dyn FeedSource>, config: SiteConfig) -> Self {
        Self {
            feed,
            config: Arc::new(config),
        }
    }

    /// Upstream HTTP source behind the revalidating response cache.
    pub fn from_config(config: SiteConfig) -> Result<Self, FetchError> {
        let upstream: Arc<dyn FeedSource> =
            Arc::new(ApiFeedSource::from_url(config.api_url.clone())?);
        let cache = Arc::new(ResponseCache::new(config.revalidate()));
        Ok(Self::new(Arc::new(CachedFeedSource::new(upstream, cache)), config))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/news", get(api_news))
        .route("/", get(home))
        .route("/category/{slug}", get(category))
        .route("/news/{slug}", get(article))
        .route("/blog", get(blog_list))
        .route("/blog/{slug}", get(blog_detail))
        .route("/gallery", get(gallery))
        .route("/video", get(video))
        .fallback(fallback)
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Internal JSON endpoint: the news array of the current snapshot.
async fn api_news(State(state): State<AppState>) -> Response {
    match state.feed.get_feed_snapshot().await {
        Ok(snap) => Json(snap.news().to_vec()).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Debug, serde::Deserialize)]
struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Anything that is not an integer means page 1; range clamping happens in the projection.
    fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Render `body` inside the site layout.
fn html_page(
    state: &AppState,
    categories: &[String],
    status: StatusCode,
    title: &str,
    body: Markup,
) -> Response {
    let ctx = RenderCtx {
        image_origin: &state.config.image_origin,
        categories,
    };
    let page = render::layout(&ctx, title, body);
    (status, Html(page.into_string())).into_response()
}

fn rendered(page: &'static str, outcome: &'static str) {
    counter!("page_renders_total", "page" => page, "outcome" => outcome).increment(1);
    tracing::debug!(target: "render", page, outcome, "page rendered");
}

/// Fetch the snapshot or produce the "try again later" page.
async fn snapshot_or_error(state: &AppState, page: &'static str) -> Result<FeedSnapshot, Response> {
    state.feed.get_feed_snapshot().await.map_err(|e| {
        tracing::warn!(target: "render", page, error = %e, "rendering fetch error state");
        rendered(page, "error");
        html_page(
            state,
            &[],
            StatusCode::BAD_GATEWAY,
            "Something went wrong",
            pages::fetch_error(),
        )
    })
}

async fn home(State(state): State<AppState>) -> Response {
    let snap = match snapshot_or_error(&state, "home").await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let categories = distinct_categories(snap.news());
    let ctx = RenderCtx {
        image_origin: &state.config.image_origin,
        categories: &categories,
    };
    let body = pages::home(
        &ctx,
        snap.news(),
        &state.config.home_section_slug,
        &state.config.home_section_title,
    );
    rendered("home", if snap.news().is_empty() { "empty" } else { "ok" });
    html_page(&state, &categories, StatusCode::OK, "", body)
}

async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(q): Query<PageQuery>,
) -> Response {
    let snap = match snapshot_or_error(&state, "category").await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let categories = distinct_categories(snap.news());
    let ctx = RenderCtx {
        image_origin: &state.config.image_origin,
        categories: &categories,
    };

    let page = projection::category_page(snap.news(), &slug, q.page(), state.config.page_size);
    let body = pages::category(&ctx, &slug, &page);
    rendered("category", if page.is_empty() { "empty" } else { "ok" });
    html_page(&state, &categories, StatusCode::OK, &page.category_name, body)
}

async fn article(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let snap = match snapshot_or_error(&state, "article").await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let news = snap.news();
    let categories = distinct_categories(news);

    let Some(item) = projection::find_by_slug(news, &slug) else {
        rendered("article", "not_found");
        let body = pages::not_found("Article", "/", "Back to Home");
        return html_page(&state, &categories, StatusCode::NOT_FOUND, "Not found", body);
    };

    let ctx = RenderCtx {
        image_origin: &state.config.image_origin,
        categories: &categories,
    };
    let related = projection::related_stories(news, item, projection::RELATED);
    let popular = projection::popular_stories(news, item, projection::POPULAR);
    let body = pages::article(&ctx, item, &related, &popular);
    rendered("article", "ok");
    html_page(&state, &categories, StatusCode::OK, &item.title, body)
}

async fn blog_list(State(state): State<AppState>) -> Response {
    let snap = match snapshot_or_error(&state, "blog").await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let categories = distinct_categories(snap.news());
    let ctx = RenderCtx {
        image_origin: &state.config.image_origin,
        categories: &categories,
    };
    let body = pages::blog_list(&ctx, snap.blogs());
    rendered("blog", if snap.blogs().is_empty() { "empty" } else { "ok" });
    html_page(&state, &categories, StatusCode::OK, "Blog", body)
}

async fn blog_detail(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let snap = match snapshot_or_error(&state, "blog_detail").await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let categories = distinct_categories(snap.news());

    let Some(blog) = projection::find_blog_by_slug(snap.blogs(), &slug) else {
        rendered("blog_detail", "not_found");
        let body = pages::not_found("Blog", "/blog", "\u{2190} Back to Blogs");
        return html_page(&state, &categories, StatusCode::NOT_FOUND, "Not found", body);
    };

    let ctx = RenderCtx {
        image_origin: &state.config.image_origin,
        categories: &categories,
    };
    let body = pages::blog_detail(&ctx, blog);
    rendered("blog_detail", "ok");
    html_page(&state, &categories, StatusCode::OK, &blog.title, body)
}

async fn gallery(State(state): State<AppState>) -> Response {
    let snap = match snapshot_or_error(&state, "gallery").await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let categories = distinct_categories(snap.news());
    let body = pages::gallery(snap.galleries());
    rendered("gallery", if snap.galleries().is_empty() { "empty" } else { "ok" });
    html_page(&state, &categories, StatusCode::OK, "Gallery", body)
}

async fn video(State(state): State<AppState>) -> Response {
    let snap = match snapshot_or_error(&state, "video").await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let categories = distinct_categories(snap.news());
    let body = pages::videos(snap.videos());
    rendered("video", if snap.videos().is_empty() { "empty" } else { "ok" });
    html_page(&state, &categories, StatusCode::OK, "Videos", body)
}

async fn fallback(State(state): State<AppState>) -> Response {
    rendered("fallback", "not_found");
    let body = pages::not_found("Page", "/", "Back to Home");
    html_page(&state, &[], StatusCode::NOT_FOUND, "Not found", body)
}
