use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::{Host, Url};

/// Upstream item identifier, as ranked by the top stories endpoint.
pub type ItemId = u64;

/// An item as returned by the Hacker News API (`/item/{id}.json`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HackerNewsItem {
    pub id: ItemId,
    // "story", "comment", "job", "poll" or "pollopt"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub by: String,
    // Unix seconds
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: i32,
    #[serde(rename = "descendants", default)]
    pub comments_count: i32,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

/// A story ready for display: the upstream item plus the host its link points at.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryItem {
    pub item: HackerNewsItem,
    pub host: String,
}

impl StoryItem {
    /// Wraps an item, deriving `host` from its URL. An unparseable or
    /// host-less URL leaves `host` empty.
    pub fn from_item(item: HackerNewsItem) -> Self {
        let host = display_host(&item.url);
        Self { item, host }
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }

    /// Human friendly age of the item relative to `now`, e.g. "3 hours ago".
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let Some(posted) = DateTime::from_timestamp(self.item.time, 0) else {
            return String::new();
        };

        let elapsed = now.signed_duration_since(posted);
        let (amount, unit) = if elapsed.num_days() > 0 {
            (elapsed.num_days(), "day")
        } else if elapsed.num_hours() > 0 {
            (elapsed.num_hours(), "hour")
        } else if elapsed.num_minutes() > 0 {
            (elapsed.num_minutes(), "minute")
        } else {
            return "just now".to_string();
        };

        if amount == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", amount, unit)
        }
    }
}

/// Hostname as a reader would type it: Unicode rather than punycode, IPv6
/// without brackets, and one leading "www." removed.
fn display_host(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let host = match parsed.host() {
        Some(Host::Domain(domain)) => idna::domain_to_unicode(domain).0,
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => return String::new(),
    };

    if let Some(rest) = host.strip_prefix("www.") {
        return rest.to_string();
    }
    host
}

/// Only link stories make it onto the page: jobs, polls, comments and
/// text-only posts (Ask HN) are skipped.
pub fn is_story_link(item: &HackerNewsItem) -> bool {
    item.kind == "story" && !item.url.is_empty()
}
