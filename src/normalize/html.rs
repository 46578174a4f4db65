// src/normalize/html.rs
use once_cell::sync::OnceCell;
use regex::{Captures, Regex};

fn re_block_close() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?i)</(p|div|li|h\d)>").unwrap())
}

fn re_line_break() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap())
}

fn re_any_tag() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn re_entity() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"&(nbsp|amp|quot|#39|lt|gt);").unwrap())
}

fn re_ws_before_newline() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\s+\n").unwrap())
}

fn re_many_newlines() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

/// Convert simple HTML content into a plain-text preview.
///
/// 1) Block closes (`</p>`, `</div>`, `</li>`, `</hN>`) and `<br>` become `\n`
/// 2) Every other tag is dropped
/// 3) `&nbsp; &amp; &quot; &#39; &lt; &gt;` are decoded in a single pass,
///    so `&amp;lt;` yields `&lt;` and never `<`
/// 4) Whitespace before a newline is removed, 3+ newlines collapse to two, ends trimmed
///
/// `None` yields an empty string.
pub fn html_to_text(html: Option<&str>) -> String {
    let Some(html) = html else {
        return String::new();
    };
    if html.is_empty() {
        return String::new();
    }

    let out = re_block_close().replace_all(html, "\n");
    let out = re_line_break().replace_all(&out, "\n");
    let out = re_any_tag().replace_all(&out, "");

    let out = re_entity().replace_all(&out, |caps: &Captures| {
        match &caps[1] {
            "nbsp" => " ",
            "amp" => "&",
            "quot" => "\"",
            "#39" => "'",
            "lt" => "<",
            _ => ">",
        }
        .to_string()
    });

    let out = re_ws_before_newline().replace_all(&out, "\n");
    let out = re_many_newlines().replace_all(&out, "\n\n");
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        assert_eq!(
            html_to_text(Some("<p>Hello</p><p>World</p>")),
            "Hello\nWorld"
        );
    }

    #[test]
    fn absent_or_empty_is_empty() {
        assert_eq!(html_to_text(None), "");
        assert_eq!(html_to_text(Some("")), "");
    }

    #[test]
    fn br_variants_and_closing_headings_break_lines() {
        let s = "Line one<br>Line two<BR/>Line three<br />end<h2>Title</H2>tail";
        assert_eq!(
            html_to_text(Some(s)),
            "Line one\nLine two\nLine three\nendTitle\ntail"
        );
    }

    #[test]
    fn other_tags_are_stripped_verbatim() {
        let s = r#"<span class="x">Coffee <b>prices</b></span> <a href="/y">rise</a>"#;
        assert_eq!(html_to_text(Some(s)), "Coffee prices rise");
    }

    #[test]
    fn entities_decode_once() {
        let s = "Tom&nbsp;&amp;&nbsp;Jerry &quot;say&quot; it&#39;s 1 &lt; 2 &gt; 0";
        assert_eq!(html_to_text(Some(s)), "Tom & Jerry \"say\" it's 1 < 2 > 0");
        assert_eq!(html_to_text(Some("&amp;lt;b&amp;gt;")), "&lt;b&gt;");
    }

    #[test]
    fn blank_runs_collapse() {
        // whitespace in front of a newline swallows the whole run
        assert_eq!(html_to_text(Some("a  \n\n\n\nb")), "a\nb");
        assert_eq!(html_to_text(Some("<div>a</div>\n<div>b</div>")), "a\nb");
        assert_eq!(html_to_text(Some("  <p> padded </p>  ")), "padded");
    }
}
