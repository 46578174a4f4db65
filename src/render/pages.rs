// src/render/pages.rs
//! Page bodies. Each fetch-consuming page has an explicit branch for
//! upstream failure, empty data, not-found and success; the handlers in
//! [`crate::api`] pick the branch.

use maud::{html, Markup, PreEscaped};

use crate::feed::{BlogPost, Gallery, NewsItem, Video};
use crate::normalize::{format_date, format_datetime, html_to_text, normalize_image, slugify};
use crate::projection::{self, CategoryPage, PageLink, Pagination};
use crate::render::cards::{self, news_grid};
use crate::render::{RenderCtx, SITE_NAME};

/// Shown when the upstream fetch failed. No retry is attempted.
pub fn fetch_error() -> Markup {
    html! {
        section class="state state-error" {
            h1 { "Oops! Something went wrong" }
            p { "We're having trouble brewing your news. Please try again later." }
            a class="button" href="/" { "Back to Home" }
        }
    }
}

pub fn not_found(what: &str, back_href: &str, back_label: &str) -> Markup {
    html! {
        section class="state state-not-found" {
            h1 { (what) " not found" }
            p { "We couldn't find what you were looking for." }
            a class="button" href=(back_href) { (back_label) }
        }
    }
}

fn nothing_available(message: &str) -> Markup {
    html! {
        section class="state state-empty" { p { (message) } }
    }
}

/// Home page: top stories, latest grid, trending sidebar, one category teaser.
pub fn home(
    ctx: &RenderCtx<'_>,
    items: &[NewsItem],
    section_slug: &str,
    section_title: &str,
) -> Markup {
    if items.is_empty() {
        return nothing_available("No stories are available right now. Check back soon!");
    }

    let top = projection::top_stories(items);
    let latest = projection::most_recent(items, projection::LATEST_GRID);
    let trending = projection::trending(items);
    let section = projection::category_section(items, section_slug, projection::CATEGORY_SECTION);

    html! {
        section class="featured" { (cards::top_stories(ctx, &top)) }
        section class="latest" {
            div class="main-column" {
                h2 { "Latest Brew" }
                (news_grid(ctx, &latest, "Source"))
            }
            div class="sidebar" { (cards::trending(&trending)) }
        }
        @if !section.is_empty() {
            section class="category-section" {
                div class="section-head" {
                    h2 { (section_title) }
                    a href=(format!("/category/{section_slug}")) { "View all" }
                }
                (news_grid(ctx, &section, SITE_NAME))
            }
        }
    }
}

fn pagination(slug: &str, p: &Pagination) -> Markup {
    let href = |page: usize| format!("/category/{slug}?page={page}");

    html! {
        nav class="pagination" {
            @match p.prev {
                Some(prev) => {
                    a class="prev" href=(href(prev)) { "Previous" }
                },
                None => {
                    span class="prev disabled" { "Previous" }
                },
            }
            @for link in &p.links {
                @match link {
                    PageLink::Number { page, active: true } => {
                        span class="page active" { (page) }
                    },
                    PageLink::Number { page, active: false } => {
                        a class="page" href=(href(*page)) { (page) }
                    },
                    PageLink::Ellipsis => {
                        span class="ellipsis" { "..." }
                    },
                }
            }
            @match p.next {
                Some(next) => {
                    a class="next" href=(href(next)) { "Next" }
                },
                None => {
                    span class="next disabled" { "Next" }
                },
            }
        }
    }
}

/// Category listing with pagination.
pub fn category(ctx: &RenderCtx<'_>, slug: &str, page: &CategoryPage<'_>) -> Markup {
    if page.is_empty() {
        return html! {
            section class="state state-empty" {
                h1 { "No " (slug) " News Available" }
                p { "We're brewing up some fresh content for this category. Check back soon!" }
                a class="button" href="/" { "Explore Other Stories" }
            }
        };
    }

    let noun = if page.total_items == 1 { "article" } else { "articles" };
    let first = (page.page - 1) * page.page_size + 1;
    let last = (page.page * page.page_size).min(page.total_items);

    html! {
        header class="category-header" {
            nav class="breadcrumb" {
                a href="/" { "Home" }
                " / "
                span { (page.category_name) }
            }
            h1 { (page.category_name) }
            p { (page.total_items) " " (noun) }
        }
        (news_grid(ctx, &page.items, SITE_NAME))
        @if let Some(p) = projection::pagination_links(page.total_pages, page.page) {
            (pagination(slug, &p))
        }
        p class="page-info" {
            "Showing " (first) " to " (last) " of " (page.total_items) " articles"
        }
    }
}

/// Article detail with related and popular lists.
pub fn article(
    ctx: &RenderCtx<'_>,
    item: &NewsItem,
    related: &[&NewsItem],
    popular: &[&NewsItem],
) -> Markup {
    let category_href = format!("/category/{}", slugify(&item.category));
    let source = item
        .source
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(SITE_NAME);
    let text = html_to_text(Some(&item.content));
    let paragraphs: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    html! {
        nav class="breadcrumb" {
            a href="/" { "Home" }
            " / "
            a href=(category_href) { (item.category) }
            " / "
            span { (item.title) }
        }
        div class="article-layout" {
            article class="article" {
                header {
                    a class="badge" href=(category_href) { (item.category) }
                    div class="meta" {
                        time { (format_date(&item.published_at)) }
                        span { (source) }
                    }
                    h1 { (item.title) }
                }
                figure {
                    img src=(normalize_image(item.image_url.as_deref(), ctx.image_origin))
                        alt=(item.title);
                }
                div class="article-body" {
                    @for para in &paragraphs {
                        p {
                            @for (i, line) in para.lines().enumerate() {
                                @if i > 0 { br; }
                                (line)
                            }
                        }
                    }
                }
                div class="tags" {
                    span { "Tags:" }
                    span class="tag" { (item.category) }
                    span class="tag" { "Breaking News" }
                    span class="tag" { "Latest" }
                }
            }
            aside class="article-sidebar" { (cards::link_list("Popular Stories", popular)) }
        }
        (cards::link_list("Related Stories", related))
    }
}

pub fn blog_list(ctx: &RenderCtx<'_>, blogs: &[BlogPost]) -> Markup {
    html! {
        header class="page-header" { h1 { "Blog" } }
        @if blogs.is_empty() {
            (nothing_available("No blogs available."))
        } @else {
            div class="blog-list" {
                @for b in blogs {
                    article class="blog-card" {
                        img src=(normalize_image(b.image.as_deref(), ctx.image_origin))
                            alt=(b.title) width="112" height="80";
                        div {
                            h2 { (b.title) }
                            // Upstream publishes summaries as HTML.
                            div class="blog-summary" { (PreEscaped(&b.summary)) }
                            a href=(format!("/blog/{}", b.slug)) { "Read more \u{2192}" }
                        }
                    }
                }
            }
        }
    }
}

pub fn blog_detail(ctx: &RenderCtx<'_>, blog: &BlogPost) -> Markup {
    let has_image = blog.image.as_deref().is_some_and(|s| !s.is_empty());
    html! {
        a class="back" href="/blog" { "\u{2190} Back to Blogs" }
        article class="blog" {
            h1 { (blog.title) }
            @if has_image {
                figure {
                    img src=(normalize_image(blog.image.as_deref(), ctx.image_origin))
                        alt=(blog.title) width="800" height="400";
                }
            }
            div class="blog-content" { (PreEscaped(&blog.content)) }
        }
    }
}

pub fn gallery(galleries: &[Gallery]) -> Markup {
    html! {
        header class="page-header" { h1 { "Gallery" } }
        @if galleries.is_empty() {
            (nothing_available("No galleries available."))
        }
        @for g in galleries {
            section class="gallery" {
                h2 { (g.title) }
                div class="gallery-grid" {
                    @for pic in &g.images {
                        img src=(pic.file_name) alt=(g.title) loading="lazy";
                    }
                }
            }
        }
    }
}

pub fn videos(videos: &[Video]) -> Markup {
    html! {
        header class="page-header" { h1 { "Videos" } }
        @if videos.is_empty() {
            (nothing_available("No videos available."))
        } @else {
            div class="video-grid" {
                @for v in videos {
                    div class="video" {
                        iframe src=(v.file_name) title=(v.title) allowfullscreen {}
                        h2 { (v.title) }
                        time { (format_datetime(&v.published_at)) }
                    }
                }
            }
        }
    }
}
