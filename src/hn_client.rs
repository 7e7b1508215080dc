use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::models::{HackerNewsItem, ItemId};

pub const DEFAULT_API_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Where ranked item ids and item details come from.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Current top items, best ranked first.
    async fn top_item_ids(&self) -> Result<Vec<ItemId>>;

    /// Full record for one item. Fails for unknown ids as well as transport errors.
    async fn get_item(&self, id: ItemId) -> Result<HackerNewsItem>;
}

/// Client for the Hacker News Firebase API.
#[derive(Clone)]
pub struct HackerNewsClient {
    client: Client,
    base_url: String,
}

impl HackerNewsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("quiet_hn/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ItemSource for HackerNewsClient {
    async fn top_item_ids(&self) -> Result<Vec<ItemId>> {
        let url = format!("{}/topstories.json", self.base_url);
        let ids = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()?
            .json::<Vec<ItemId>>()
            .await
            .context("Malformed top stories response")?;

        Ok(ids)
    }

    async fn get_item(&self, id: ItemId) -> Result<HackerNewsItem> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        // The API answers unknown ids with 200 and a literal `null`
        let item = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()?
            .json::<Option<HackerNewsItem>>()
            .await
            .with_context(|| format!("Malformed response for item {}", id))?;

        item.ok_or_else(|| anyhow!("Item {} not found", id))
    }
}
