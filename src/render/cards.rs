// src/render/cards.rs
use maud::{html, Markup};

use crate::feed::NewsItem;
use crate::normalize::{format_date, html_to_text, normalize_image};
use crate::projection::{Ranked, TopStories};
use crate::render::{RenderCtx, SITE_NAME};

/// Plain-text teaser taken from the article body.
pub fn preview(item: &NewsItem) -> String {
    html_to_text(Some(&item.content))
}

fn source_or<'a>(item: &'a NewsItem, fallback: &'a str) -> &'a str {
    item.source
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
}

fn news_href(item: &NewsItem) -> String {
    format!("/news/{}", item.slug)
}

fn image(ctx: &RenderCtx<'_>, item: &NewsItem) -> Markup {
    html! {
        img src=(normalize_image(item.image_url.as_deref(), ctx.image_origin))
            alt=(item.title) loading="lazy";
    }
}

/// Grid card used by "Latest Brew" and category pages.
pub fn news_card(ctx: &RenderCtx<'_>, item: &NewsItem, source_fallback: &str) -> Markup {
    html! {
        article class="news-card" {
            a href=(news_href(item)) {
                div class="card-image" {
                    (image(ctx, item))
                    span class="badge" { (item.category) }
                }
                h3 { (item.title) }
                p class="preview" { (preview(item)) }
                div class="meta" {
                    time { (format_date(&item.published_at)) }
                    span { (source_or(item, source_fallback)) }
                }
            }
        }
    }
}

pub fn news_grid(ctx: &RenderCtx<'_>, items: &[&NewsItem], source_fallback: &str) -> Markup {
    html! {
        div class="news-grid" {
            @for it in items {
                (news_card(ctx, it, source_fallback))
            }
        }
    }
}

/// Hero + secondary cards. Empty markup when the feed has nothing.
pub fn top_stories(ctx: &RenderCtx<'_>, top: &TopStories<'_>) -> Markup {
    let Some(hero) = top.hero else {
        return html! {};
    };

    html! {
        div class="top-stories" {
            a class="hero" href=(news_href(hero)) {
                (image(ctx, hero))
                div class="hero-overlay" {
                    span class="badge" { (hero.category) }
                    h1 { (hero.title) }
                    p class="preview" { (preview(hero)) }
                    div class="meta" {
                        time { (format_date(&hero.published_at)) }
                        " \u{2022} "
                        span { (source_or(hero, SITE_NAME)) }
                    }
                }
            }
            div class="secondary-stories" {
                @for it in &top.secondary {
                    a class="secondary-card" href=(news_href(it)) {
                        (image(ctx, it))
                        span class="badge" { (it.category) }
                        h3 { (it.title) }
                        time { (format_date(&it.published_at)) }
                    }
                }
            }
        }
    }
}

/// Ranked sidebar.
pub fn trending(entries: &[Ranked<'_>]) -> Markup {
    if entries.is_empty() {
        return html! {};
    }
    html! {
        aside class="trending" {
            h2 { "Trending" }
            ol {
                @for e in entries {
                    li {
                        span class="rank" { (e.rank) }
                        a href=(news_href(e.item)) { (e.item.title) }
                        small {
                            (format_date(&e.item.published_at))
                            " \u{2022} "
                            (source_or(e.item, &e.item.category))
                        }
                    }
                }
            }
        }
    }
}

/// Compact titled list (related / popular on the article page).
pub fn link_list(heading: &str, items: &[&NewsItem]) -> Markup {
    if items.is_empty() {
        return html! {};
    }
    html! {
        section class="link-list" {
            h2 { (heading) }
            ul {
                @for it in items {
                    li {
                        a href=(news_href(it)) { (it.title) }
                        time { (format_date(&it.published_at)) }
                    }
                }
            }
        }
    }
}
