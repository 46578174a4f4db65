// src/render/mod.rs
//! Server-side HTML for every page, built with `maud` templates.
//!
//! Renderers take already-projected data and return [`Markup`]; they never
//! fetch. maud escapes every interpolated value, so feed text is safe by
//! default. Blog bodies are the one exception: upstream publishes them as
//! HTML and they are embedded with `PreEscaped`.

pub mod cards;
pub mod pages;

use chrono::Datelike;
use maud::{html, Markup, DOCTYPE};

use crate::normalize::slugify;
use crate::projection::{split_navigation, MAIN_NAV_CATEGORIES};

pub const SITE_NAME: &str = "CoffeeDigest";
pub const SITE_TAGLINE: &str = "Freshly Brewed News";
const SITE_DESCRIPTION: &str = "CoffeeDigest brings you the latest news, perfectly brewed and \
     served fresh. Stay informed with our rich blend of stories from around the world.";

/// Per-request inputs shared by all renderers.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx<'a> {
    pub image_origin: &'a str,
    /// Distinct categories of the current snapshot (empty when the fetch failed).
    pub categories: &'a [String],
}

/// Wrap a page body with `<head>`, navbar and footer.
pub fn layout(ctx: &RenderCtx<'_>, title: &str, body: Markup) -> Markup {
    let full_title = if title.is_empty() {
        format!("{SITE_NAME} - Your Daily News with a Rich Brew")
    } else {
        format!("{title} | {SITE_NAME}")
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (full_title) }
                meta name="description" content=(SITE_DESCRIPTION);
                link rel="icon" href="/logo.png";
            }
            body class="site" {
                (navbar(ctx.categories))
                main { (body) }
                (footer())
            }
        }
    }
}

fn category_link(name: &str) -> Markup {
    html! {
        a href=(format!("/category/{}", slugify(name))) { (name) }
    }
}

fn navbar(categories: &[String]) -> Markup {
    let (main, more) = split_navigation(categories, MAIN_NAV_CATEGORIES);

    html! {
        nav class="navbar" {
            a class="brand" href="/" {
                span class="brand-name" { (SITE_NAME) }
                span class="brand-tagline" { (SITE_TAGLINE) }
            }
            ul class="nav-main" {
                li { a href="/" { "Home" } }
                li { a href="/gallery" { "Gallery" } }
                li { a href="/video" { "Videos" } }
                li { a href="/blog" { "Blog" } }
                @for c in main {
                    li { (category_link(c)) }
                }
                @if !more.is_empty() {
                    li class="nav-more" {
                        span { "More" }
                        ul {
                            @for c in more {
                                li { (category_link(c)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    let year = chrono::Utc::now().year();
    html! {
        footer class="footer" {
            span { (SITE_NAME) }
            p { "\u{a9} " (year) " " (SITE_NAME) ". Freshly brewed news daily." }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn layout_escapes_title_and_lists_categories() {
        let cats = cats(&["Business", "Food & Drink", "Science", "Sports", "Tech", "World"]);
        let ctx = RenderCtx {
            image_origin: "https://img.example.org",
            categories: &cats,
        };
        let html = layout(&ctx, "<Breaking>", html! { p { "body" } }).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>&lt;Breaking&gt; | CoffeeDigest</title>"));
        assert!(html.contains(r#"<a href="/category/food-drink">Food &amp; Drink</a>"#));
        // sixth category goes under "More"
        let more_at = html.find("nav-more").unwrap();
        assert!(html.find("/category/world").unwrap() > more_at);
        assert!(html.contains("<main><p>body</p></main>"));
    }

    #[test]
    fn no_more_menu_for_few_categories() {
        let cats = cats(&["World"]);
        let ctx = RenderCtx {
            image_origin: "https://img.example.org",
            categories: &cats,
        };
        let html = layout(&ctx, "", html! {}).into_string();
        assert!(!html.contains("nav-more"));
        assert!(html.contains("<title>CoffeeDigest - Your Daily News with a Rich Brew</title>"));
    }
}
