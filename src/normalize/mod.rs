// src/normalize/mod.rs
//! Pure, total helpers that turn raw feed fields into display-ready values.
//!
//! None of these return `Result`: malformed input degrades to a documented
//! default (empty string, placeholder image, the original string).

pub mod date;
pub mod html;
pub mod image;
pub mod slug;

pub use date::{format_date, format_datetime, parse_timestamp};
pub use html::html_to_text;
pub use image::{normalize_image, DEFAULT_IMAGE_ORIGIN, PLACEHOLDER_IMAGE};
pub use slug::{category_from_slug, distinct_categories, filter_by_category, slugify};
