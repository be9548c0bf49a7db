//! RSS and Atom parsing into the feed model.

use rss::Channel;

use rotacal_core::cache::FetchError;
use rotacal_core::feeds::{Feed, FeedItem};

/// Parses an RSS or Atom document fetched from `url`.
///
/// RSS is tried first; a document that is not an RSS channel is read as
/// an Atom feed. A well-formed document without items is reported as
/// [`FetchError::Empty`], matching what a reader would show for it.
pub fn parse_feed(body: &str, url: &str) -> Result<Feed, FetchError> {
    let feed = match Channel::read_from(body.as_bytes()) {
        Ok(channel) => from_channel(&channel),
        Err(rss_err) => match atom_syndication::Feed::read_from(body.as_bytes()) {
            Ok(atom) => from_atom(&atom),
            Err(atom_err) => {
                tracing::debug!(url, %rss_err, %atom_err, "Document is neither RSS nor Atom");
                return Err(FetchError::Parse(rss_err.to_string()));
            }
        },
    };

    if feed.is_empty() {
        return Err(FetchError::Empty(url.to_string()));
    }
    Ok(feed)
}

fn from_channel(channel: &Channel) -> Feed {
    let items = channel
        .items()
        .iter()
        .map(|item| {
            FeedItem::from_parts(
                item.title(),
                item.link(),
                item.description().or(item.content()),
                item.pub_date(),
            )
        })
        .collect();

    Feed {
        title: channel.title().trim().to_string(),
        items,
    }
}

fn from_atom(atom: &atom_syndication::Feed) -> Feed {
    let items = atom
        .entries()
        .iter()
        .map(|entry| {
            let link = entry
                .links()
                .iter()
                .find(|l| l.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|l| l.href());
            let description = entry
                .summary()
                .map(|t| t.value.as_str())
                .or_else(|| entry.content().and_then(|c| c.value()));
            let published = entry
                .published()
                .unwrap_or_else(|| entry.updated())
                .to_rfc2822();

            FeedItem::from_parts(
                Some(entry.title().value.as_str()),
                link,
                description,
                Some(&published),
            )
        })
        .collect();

    Feed {
        title: atom.title().value.trim().to_string(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://vnexpress.net/rss/tin-moi-nhat.rss";

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>VnExpress RSS</title>
    <link>https://vnexpress.net</link>
    <description>Tin moi nhat</description>
    <item>
      <title>Gold prices climb</title>
      <link>https://vnexpress.net/gold.html</link>
      <description><![CDATA[<a href="https://vnexpress.net/gold.html"><img src="https://i.vnecdn.net/gold.jpg"></a></br>Gold prices climb Prices rose sharply this morning.]]></description>
      <pubDate>Mon, 27 Oct 2025 08:00:00 +0700</pubDate>
    </item>
    <item>
      <title>Second story</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_items() {
        let feed = parse_feed(SAMPLE, URL).unwrap();

        assert_eq!(feed.title, "VnExpress RSS");
        assert_eq!(feed.len(), 2);

        let first = &feed.items[0];
        assert_eq!(first.title, "Gold prices climb");
        assert_eq!(first.link.as_deref(), Some("https://vnexpress.net/gold.html"));
        assert_eq!(first.summary, "Prices rose sharply this morning.");
        assert_eq!(first.image.as_deref(), Some("https://i.vnecdn.net/gold.jpg"));
        assert_eq!(
            first.pub_date.as_deref(),
            Some("Mon, 27 Oct 2025 08:00:00 +0700")
        );

        let second = &feed.items[1];
        assert_eq!(second.link, None);
        assert_eq!(second.summary, "");
    }

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Tuoi Tre</title>
  <id>urn:uuid:feed</id>
  <updated>2025-10-27T08:00:00+07:00</updated>
  <entry>
    <title>Rain expected</title>
    <id>urn:uuid:rain</id>
    <link rel="enclosure" href="https://cdn.example/rain.mp3"/>
    <link rel="alternate" href="https://example.vn/rain.html"/>
    <published>2025-10-27T07:30:00+07:00</published>
    <updated>2025-10-27T08:00:00+07:00</updated>
    <summary type="html">&lt;img src="https://cdn.example/rain.jpg"&gt;Showers &amp;amp; storms tonight.</summary>
  </entry>
  <entry>
    <title>Update only</title>
    <id>urn:uuid:update</id>
    <updated>2025-10-26T12:00:00Z</updated>
    <content type="html">&lt;p&gt;Body&lt;/p&gt;</content>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_atom_entries() {
        let feed = parse_feed(ATOM, URL).unwrap();

        assert_eq!(feed.title, "Tuoi Tre");
        assert_eq!(feed.len(), 2);

        let first = &feed.items[0];
        assert_eq!(first.title, "Rain expected");
        assert_eq!(first.link.as_deref(), Some("https://example.vn/rain.html"));
        assert_eq!(first.summary, "Showers & storms tonight.");
        assert_eq!(first.image.as_deref(), Some("https://cdn.example/rain.jpg"));
        assert_eq!(
            first.pub_date.as_deref(),
            Some("Mon, 27 Oct 2025 07:30:00 +0700")
        );

        let second = &feed.items[1];
        assert_eq!(second.link, None);
        assert_eq!(second.summary, "Body");
        assert_eq!(
            second.pub_date.as_deref(),
            Some("Sun, 26 Oct 2025 12:00:00 +0000")
        );
    }

    #[test]
    fn test_atom_without_entries_is_empty() {
        let body = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>t</title><id>i</id><updated>2025-10-27T08:00:00Z</updated></feed>"#;
        assert_eq!(
            parse_feed(body, URL),
            Err(FetchError::Empty(URL.to_string()))
        );
    }

    #[test]
    fn test_channel_without_items_is_empty() {
        let body = r#"<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description></channel></rss>"#;
        assert_eq!(
            parse_feed(body, URL),
            Err(FetchError::Empty(URL.to_string()))
        );
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            parse_feed("<html>not a feed</html>", URL),
            Err(FetchError::Parse(_))
        ));
        assert!(matches!(parse_feed("", URL), Err(FetchError::Parse(_))));
    }
}
