// src/normalize/image.rs
use reqwest::Url;

/// Served when an item has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Origin that relative upstream image paths are resolved against.
pub const DEFAULT_IMAGE_ORIGIN: &str = "https://newssiteimages.timesmed.com";

/// Resolve a possibly-relative image path against `origin`.
///
/// Absolute URLs pass through (re-serialized); relative ones are joined onto
/// `origin`. Absent, empty or unresolvable input yields [`PLACEHOLDER_IMAGE`].
pub fn normalize_image(raw: Option<&str>, origin: &str) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return PLACEHOLDER_IMAGE.to_string();
    };

    Url::parse(origin)
        .and_then(|base| base.join(raw))
        .map(|u| u.to_string())
        .unwrap_or_else(|e| {
            tracing::debug!(target: "render", error = %e, raw, "image url rejected");
            PLACEHOLDER_IMAGE.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_use_placeholder() {
        assert_eq!(normalize_image(None, DEFAULT_IMAGE_ORIGIN), PLACEHOLDER_IMAGE);
        assert_eq!(normalize_image(Some(""), DEFAULT_IMAGE_ORIGIN), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn relative_paths_join_origin() {
        assert_eq!(
            normalize_image(Some("/uploads/cup.jpg"), DEFAULT_IMAGE_ORIGIN),
            "https://newssiteimages.timesmed.com/uploads/cup.jpg"
        );
        assert_eq!(
            normalize_image(Some("uploads/cup.jpg"), "https://img.example.org"),
            "https://img.example.org/uploads/cup.jpg"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            normalize_image(Some("https://cdn.example.com/a.png?w=3"), DEFAULT_IMAGE_ORIGIN),
            "https://cdn.example.com/a.png?w=3"
        );
        assert_eq!(
            normalize_image(Some("//cdn.example.com/b.png"), DEFAULT_IMAGE_ORIGIN),
            "https://cdn.example.com/b.png"
        );
    }

    #[test]
    fn unresolvable_input_uses_placeholder() {
        assert_eq!(normalize_image(Some("http://[::1"), DEFAULT_IMAGE_ORIGIN), PLACEHOLDER_IMAGE);
        assert_eq!(normalize_image(Some("a.png"), "not an origin"), PLACEHOLDER_IMAGE);
    }
}
