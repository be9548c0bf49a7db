//! Parsed feed payloads and the text clean-up applied to item descriptions.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Title shown for items that have none.
pub const UNTITLED: &str = "Untitled";

/// One article of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
    /// Plain-text description with markup removed.
    pub summary: String,
    /// First image referenced by the description markup.
    pub image: Option<String>,
    pub pub_date: Option<String>,
}

impl FeedItem {
    /// Builds an item from raw channel fields, cleaning the description.
    pub fn from_parts(
        title: Option<&str>,
        link: Option<&str>,
        description: Option<&str>,
        pub_date: Option<&str>,
    ) -> Self {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
            .to_string();
        let description = description.unwrap_or_default();

        Self {
            summary: summary_text(description, &title),
            image: first_image_src(description),
            link: non_empty(link),
            pub_date: non_empty(pub_date),
            title,
        }
    }
}

/// A parsed feed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub items: Vec<FeedItem>,
}

impl Feed {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

// Leading whitespace keeps `data-src` and similar attributes from matching.
static IMG_SRC: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).ok()
});

/// Removes markup from `html`, decoding entities and collapsing whitespace.
pub fn strip_markup(html: &str) -> String {
    let text = match TAG.as_ref() {
        Some(re) => re.replace_all(html, " "),
        None => Cow::Borrowed(html),
    };
    html_escape::decode_html_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Description text with a leading repeat of the title removed.
pub fn summary_text(description: &str, title: &str) -> String {
    let text = strip_markup(description);
    match text.strip_prefix(title) {
        Some(rest) if !title.is_empty() => rest.trim().to_string(),
        _ => text,
    }
}

/// Returns the `src` of the first `<img>` tag in `html` that has one.
pub fn first_image_src(html: &str) -> Option<String> {
    let caps = IMG_SRC.as_ref()?.captures(html)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .or_else(|| caps.get(3).map(|m| m.as_str().trim_end_matches('/')))?;
    let src = html_escape::decode_html_entities(raw.trim()).to_string();

    (!src.is_empty()).then_some(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = r#"<a href="https://vnexpress.net/a"><img src="https://i.vnecdn.net/a.jpg" ></a></br>Giá vàng tăng mạnh trong phiên sáng nay."#;

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<p>Hello <b>world</b></p>\n  again"),
            "Hello world again"
        );
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_strip_markup_decodes_entities() {
        assert_eq!(
            strip_markup("<p>Tom &amp; Jerry &quot;live&quot;</p>"),
            "Tom & Jerry \"live\""
        );
        assert_eq!(strip_markup("a&nbsp;&nbsp;b &#39;c&#39;"), "a b 'c'");
        // Escaped markup is text, not a tag.
        assert_eq!(strip_markup("1 &lt;b&gt; 2"), "1 <b> 2");
    }

    #[test]
    fn test_first_image_src() {
        assert_eq!(
            first_image_src(DESCRIPTION),
            Some("https://i.vnecdn.net/a.jpg".to_string())
        );
        assert_eq!(
            first_image_src("<IMG alt='x' src='b.png'>"),
            Some("b.png".to_string())
        );
        assert_eq!(first_image_src("<img src=c.gif />"), Some("c.gif".to_string()));
        assert_eq!(first_image_src("no image"), None);
        assert_eq!(first_image_src("<img alt=\"x\">"), None);
    }

    #[test]
    fn test_first_image_src_skips_lazy_placeholders() {
        assert_eq!(
            first_image_src(r#"<img data-src="lazy-placeholder.gif" src="https://real/img.jpg">"#),
            Some("https://real/img.jpg".to_string())
        );
        assert_eq!(
            first_image_src(r#"<img src="https://i.vnecdn.net/a.jpg?w=1&amp;h=2">"#),
            Some("https://i.vnecdn.net/a.jpg?w=1&h=2".to_string())
        );
        assert_eq!(first_image_src(r#"<img data-src="only-lazy.gif">"#), None);
    }

    #[test]
    fn test_summary_drops_repeated_title() {
        assert_eq!(
            summary_text("<p>Headline: body text</p>", "Headline:"),
            "body text"
        );
        assert_eq!(summary_text("Other text", "Headline"), "Other text");
    }

    #[test]
    fn test_item_from_parts() {
        let item = FeedItem::from_parts(
            Some(" Giá vàng "),
            Some("https://vnexpress.net/a"),
            Some(DESCRIPTION),
            Some("Mon, 27 Oct 2025 08:00:00 +0700"),
        );
        assert_eq!(item.title, "Giá vàng");
        assert_eq!(item.summary, "tăng mạnh trong phiên sáng nay.");
        assert_eq!(item.image.as_deref(), Some("https://i.vnecdn.net/a.jpg"));
        assert_eq!(item.link.as_deref(), Some("https://vnexpress.net/a"));
    }

    #[test]
    fn test_item_defaults() {
        let item = FeedItem::from_parts(None, Some(""), None, None);
        assert_eq!(item.title, UNTITLED);
        assert_eq!(item.link, None);
        assert_eq!(item.summary, "");
        assert_eq!(item.image, None);
        assert_eq!(item.pub_date, None);
    }
}
