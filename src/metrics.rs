use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process) and publish the
    /// configured revalidation window as a static gauge.
    ///
    /// Returns `None` when some other global recorder is already installed.
    pub fn init(revalidate_secs: u64) -> Option<Self> {
        static HANDLE: OnceCell<Option<PrometheusHandle>> = OnceCell::new();

        let handle = HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(h) => {
                describe();
                Some(h)
            }
            Err(e) => {
                tracing::warn!(error = %e, "prometheus: recorder not installed");
                None
            }
        });

        let handle = handle.clone()?;
        gauge!("feed_cache_revalidate_secs").set(revalidate_secs as f64);
        Some(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!("feed_fetch_total", "Upstream feed fetch attempts.");
    describe_counter!("feed_fetch_errors_total", "Failed upstream fetches by kind.");
    describe_histogram!("feed_fetch_ms", "Upstream fetch + decode time in milliseconds.");
    describe_counter!("feed_cache_hits_total", "Requests served from the response cache.");
    describe_counter!("feed_cache_misses_total", "Requests that had to fetch upstream.");
    describe_counter!("page_renders_total", "Rendered pages by page and outcome.");
    describe_gauge!("feed_cache_revalidate_secs", "Configured revalidation window.");
}
