// src/normalize/slug.rs
//! Category slugs.
//!
//! A category's slug is never stored: it is recomputed with [`slugify`]
//! everywhere, so forward filtering (`/category/{slug}`) and the reverse
//! "slug → display name" lookup always agree.

use std::collections::BTreeSet;

use crate::feed::NewsItem;

/// Lowercase `name`, turn every run of characters outside `[a-z0-9]` into a
/// single `-`, and drop leading/trailing hyphens.
///
/// ```
/// use coffee_digest::normalize::slugify;
/// assert_eq!(slugify("World News!!"), "world-news");
/// assert_eq!(slugify("  "), "");
/// ```
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    // Start true so a leading run never emits a hyphen.
    let mut prev_was_hyphen = true;

    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            out.push('-');
            prev_was_hyphen = true;
        }
    }

    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// All items whose category slugifies to `slug`, in feed order.
pub fn filter_by_category<'a>(items: &'a [NewsItem], slug: &str) -> Vec<&'a NewsItem> {
    items
        .iter()
        .filter(|i| slugify(&i.category) == slug)
        .collect()
}

/// Display name of the first item whose category slugifies to `slug`.
/// Falls back to `slug` itself when nothing matches.
pub fn category_from_slug(items: &[NewsItem], slug: &str) -> String {
    items
        .iter()
        .find(|i| slugify(&i.category) == slug)
        .map(|i| i.category.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(slug)
        .to_string()
}

/// Distinct, trimmed, non-empty category names, sorted by display name.
pub fn distinct_categories(items: &[NewsItem]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.category.trim();
        if !t.is_empty() {
            set.insert(t.to_string());
        }
    }
    set.into_iter().collect()
}
