//! # Feed Projections
//! Pure, testable functions that derive each page's view from one feed
//! snapshot. No I/O and no hidden state: the current page number and the
//! selected category are plain parameters.
//!
//! Ordering policy: "most recent" uses Rust's stable `sort_by` on the parsed
//! `published_at`, descending. Equal timestamps keep feed order, and
//! unparseable timestamps sort after every parseable one (in feed order).

use std::cmp::Ordering;

use serde::Serialize;

use crate::feed::{BlogPost, NewsItem};
use crate::normalize::{category_from_slug, filter_by_category, parse_timestamp};

pub const TOP_STORIES: usize = 4;
pub const TRENDING: usize = 9;
pub const LATEST_GRID: usize = 12;
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const RELATED: usize = 4;
pub const POPULAR: usize = 5;
pub const CATEGORY_SECTION: usize = 3;
pub const MAIN_NAV_CATEGORIES: usize = 5;
/// Numbered pagination buttons shown before the ellipsis.
pub const PAGE_BUTTONS: usize = 5;

fn newest_first(a: &NewsItem, b: &NewsItem) -> Ordering {
    // Option<DateTime>: None < Some, so reversing puts unparseable last.
    parse_timestamp(&b.published_at).cmp(&parse_timestamp(&a.published_at))
}

/// Newest `n` items.
pub fn most_recent(items: &[NewsItem], n: usize) -> Vec<&NewsItem> {
    let mut sorted: Vec<&NewsItem> = items.iter().collect();
    sorted.sort_by(|a, b| newest_first(a, b));
    sorted.truncate(n);
    sorted
}

/// Home page hero plus secondary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct TopStories<'a> {
    pub hero: Option<&'a NewsItem>,
    pub secondary: Vec<&'a NewsItem>,
}

pub fn top_stories(items: &[NewsItem]) -> TopStories<'_> {
    let mut top = most_recent(items, TOP_STORIES).into_iter();
    let hero = top.next();
    TopStories {
        hero,
        secondary: top.collect(),
    }
}

/// Ranked sidebar entry (`rank` starts at 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub rank: usize,
    pub item: &'a NewsItem,
}

pub fn trending(items: &[NewsItem]) -> Vec<Ranked<'_>> {
    most_recent(items, TRENDING)
        .into_iter()
        .enumerate()
        .map(|(i, item)| Ranked { rank: i + 1, item })
        .collect()
}

/// One page of a category listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPage<'a> {
    /// Display name, or the slug itself when no item carries the category.
    pub category_name: String,
    pub items: Vec<&'a NewsItem>,
    /// Page actually shown, after clamping (always >= 1).
    pub page: usize,
    /// `ceil(total_items / page_size)`; 0 for an empty category.
    pub total_pages: usize,
    pub total_items: usize,
    /// Effective page size (never 0).
    pub page_size: usize,
}

impl CategoryPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Category filter + pagination. `page` below 1 clamps to 1, above the last
/// page clamps to the last page. A `page_size` of 0 is treated as 1.
pub fn category_page<'a>(
    items: &'a [NewsItem],
    slug: &str,
    page: i64,
    page_size: usize,
) -> CategoryPage<'a> {
    let page_size = page_size.max(1);
    let category_name = category_from_slug(items, slug);
    let filtered = filter_by_category(items, slug);
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size);

    let requested = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let page = requested.min(total_pages.max(1));

    let start = (page - 1).saturating_mul(page_size);
    let page_items = filtered.into_iter().skip(start).take(page_size).collect();

    CategoryPage {
        category_name,
        items: page_items,
        page,
        total_pages,
        total_items,
        page_size,
    }
}

/// Up to `n` other items with exactly the same category, in feed order.
pub fn related_stories<'a>(
    items: &'a [NewsItem],
    item: &NewsItem,
    n: usize,
) -> Vec<&'a NewsItem> {
    items
        .iter()
        .filter(|i| i.category == item.category && !is_same(i, item))
        .take(n)
        .collect()
}

/// Newest `n` items other than `item`.
pub fn popular_stories<'a>(
    items: &'a [NewsItem],
    item: &NewsItem,
    n: usize,
) -> Vec<&'a NewsItem> {
    let mut others: Vec<&NewsItem> = items.iter().filter(|i| !is_same(i, item)).collect();
    others.sort_by(|a, b| newest_first(a, b));
    others.truncate(n);
    others
}

fn is_same(a: &NewsItem, b: &NewsItem) -> bool {
    if a.id.0.is_empty() && b.id.0.is_empty() {
        // No ids upstream: fall back to the (unique) slug.
        a.slug == b.slug
    } else {
        a.id == b.id
    }
}

/// First item with this slug; duplicates resolve to the first in feed order.
pub fn find_by_slug<'a>(items: &'a [NewsItem], slug: &str) -> Option<&'a NewsItem> {
    items.iter().find(|i| i.slug == slug)
}

pub fn find_blog_by_slug<'a>(blogs: &'a [BlogPost], slug: &str) -> Option<&'a BlogPost> {
    blogs.iter().find(|b| b.slug == slug)
}

/// Home page teaser for one category: first `n` matches in feed order.
pub fn category_section<'a>(items: &'a [NewsItem], slug: &str, n: usize) -> Vec<&'a NewsItem> {
    let mut v = filter_by_category(items, slug);
    v.truncate(n);
    v
}

/// Navbar split: the first `main` categories inline, the rest under "More".
pub fn split_navigation(categories: &[String], main: usize) -> (&[String], &[String]) {
    categories.split_at(main.min(categories.len()))
}

/// One element of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Number { page: usize, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub links: Vec<PageLink>,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Buttons for `1..=min(5, total)`, then `…` and the last page when there
/// are more than five pages. `None` when there is nothing to paginate.
pub fn pagination_links(total_pages: usize, current: usize) -> Option<Pagination> {
    if total_pages <= 1 {
        return None;
    }
    let current = current.clamp(1, total_pages);

    let mut links: Vec<PageLink> = (1..=total_pages.min(PAGE_BUTTONS))
        .map(|page| PageLink::Number {
            page,
            active: page == current,
        })
        .collect();
    if total_pages > PAGE_BUTTONS {
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Number {
            page: total_pages,
            active: current == total_pages,
        });
    }

    Some(Pagination {
        links,
        prev: (current > 1).then(|| current - 1),
        next: (current < total_pages).then(|| current + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::NewsId;

    fn item(id: &str, slug: &str, category: &str, ts: &str) -> NewsItem {
        NewsItem {
            id: NewsId(id.into()),
            slug: slug.into(),
            category: category.into(),
            published_at: ts.into(),
            ..NewsItem::default()
        }
    }

    fn slugs(v: &[&NewsItem]) -> Vec<String> {
        v.iter().map(|i| i.slug.clone()).collect()
    }

    fn feed() -> Vec<NewsItem> {
        vec![
            item("1", "old", "World", "2024-01-01"),
            item("2", "new", "Business", "2024-03-01"),
            item("3", "mid-a", "World", "2024-02-01"),
            item("4", "mid-b", "Sports", "2024-02-01"),
            item("5", "bad-date", "World", "sometime"),
            item("6", "mid-c", "World", "2024-02-01T00:00:00Z"),
        ]
    }

    #[test]
    fn most_recent_is_stable_and_bounded() {
        let f = feed();
        assert_eq!(
            slugs(&most_recent(&f, 10)),
            vec!["new", "mid-a", "mid-b", "mid-c", "old", "bad-date"]
        );
        assert_eq!(slugs(&most_recent(&f, 2)), vec!["new", "mid-a"]);
        assert!(most_recent(&f, 0).is_empty());
        assert!(most_recent(&[], 4).is_empty());
    }

    #[test]
    fn rfc2822_timestamps_sort_with_iso_ones() {
        let f = vec![
            item("1", "old", "World", "2023-01-01"),
            item("2", "new", "World", "Tue, 02 Jan 2024 10:00:00 GMT"),
        ];
        assert_eq!(slugs(&most_recent(&f, 2)), vec!["new", "old"]);
    }

    #[test]
    fn top_stories_hero_and_three_cards() {
        let f = feed();
        let top = top_stories(&f);
        assert_eq!(top.hero.map(|i| i.slug.as_str()), Some("new"));
        assert_eq!(slugs(&top.secondary), vec!["mid-a", "mid-b", "mid-c"]);

        let empty = top_stories(&[]);
        assert!(empty.hero.is_none());
        assert!(empty.secondary.is_empty());
    }

    #[test]
    fn trending_ranks_from_one() {
        let f = feed();
        let t = trending(&f);
        assert_eq!(t.len(), 6);
        assert_eq!(t[0].rank, 1);
        assert_eq!(t[0].item.slug, "new");
        assert_eq!(t[5].rank, 6);
    }

    #[test]
    fn category_page_clamps() {
        let f: Vec<NewsItem> = (0..30)
            .map(|i| item(&i.to_string(), &format!("s{i}"), "Tech", "2024-01-01"))
            .collect();

        let p1 = category_page(&f, "tech", 1, 12);
        assert_eq!(p1.total_pages, 3);
        assert_eq!(p1.items.len(), 12);
        assert_eq!(p1.items[0].slug, "s0");
        assert_eq!(p1.category_name, "Tech");

        let last = category_page(&f, "tech", 99, 12);
        assert_eq!(last.page, 3);
        assert_eq!(last.items.len(), 6);
        assert_eq!(last.items[0].slug, "s24");

        let low = category_page(&f, "tech", -4, 12);
        assert_eq!(low.page, 1);
        assert_eq!(low.items[0].slug, "s0");
    }

    #[test]
    fn empty_category_page() {
        let f = feed();
        let p = category_page(&f, "gardening", 3, 12);
        assert!(p.is_empty());
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.category_name, "gardening");
    }

    #[test]
    fn related_and_popular_exclude_the_article() {
        let f = feed();
        let current = &f[0];
        assert_eq!(
            slugs(&related_stories(&f, current, RELATED)),
            vec!["mid-a", "bad-date", "mid-c"]
        );
        assert_eq!(
            slugs(&popular_stories(&f, current, POPULAR)),
            vec!["new", "mid-a", "mid-b", "mid-c", "bad-date"]
        );
        assert_eq!(related_stories(&f, current, 1).len(), 1);
    }

    #[test]
    fn find_by_slug_first_match_wins() {
        let mut f = feed();
        f.push(item("99", "new", "Dup", "2025-01-01"));
        assert_eq!(find_by_slug(&f, "new").map(|i| i.id.0.as_str()), Some("2"));
        assert!(find_by_slug(&f, "missing").is_none());
    }

    #[test]
    fn navigation_split() {
        let cats: Vec<String> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (main, more) = split_navigation(&cats, MAIN_NAV_CATEGORIES);
        assert_eq!(main.len(), 5);
        assert_eq!(more, &["F".to_string(), "G".to_string()]);

        let few = vec!["A".to_string()];
        let (main, more) = split_navigation(&few, MAIN_NAV_CATEGORIES);
        assert_eq!(main.len(), 1);
        assert!(more.is_empty());
    }

    #[test]
    fn pagination_window() {
        assert!(pagination_links(0, 1).is_none());
        assert!(pagination_links(1, 1).is_none());

        let p = pagination_links(3, 1).unwrap();
        assert_eq!(p.links.len(), 3);
        assert_eq!(p.prev, None);
        assert_eq!(p.next, Some(2));

        let p = pagination_links(8, 8).unwrap();
        assert_eq!(p.links.len(), 7);
        assert_eq!(p.links[5], PageLink::Ellipsis);
        assert_eq!(p.links[6], PageLink::Number { page: 8, active: true });
        assert_eq!(p.prev, Some(7));
        assert_eq!(p.next, None);
    }
}
