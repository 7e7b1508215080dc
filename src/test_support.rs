//! In-memory `ItemSource` shared by the unit tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::hn_client::ItemSource;
use crate::models::{HackerNewsItem, ItemId};

pub fn story(id: ItemId) -> HackerNewsItem {
    HackerNewsItem {
        id,
        kind: "story".to_string(),
        by: "pg".to_string(),
        title: format!("Story {}", id),
        url: format!("https://www.example.com/{}", id),
        score: 10,
        ..Default::default()
    }
}

pub fn text_post(id: ItemId) -> HackerNewsItem {
    HackerNewsItem {
        url: String::new(),
        title: format!("Ask HN {}", id),
        ..story(id)
    }
}

pub fn job(id: ItemId) -> HackerNewsItem {
    HackerNewsItem {
        kind: "job".to_string(),
        ..story(id)
    }
}

#[derive(Default)]
pub struct FakeSource {
    ranking: Vec<ItemId>,
    items: HashMap<ItemId, HackerNewsItem>,
    delays: HashMap<ItemId, Duration>,
    panics: HashSet<ItemId>,
    fail_ranking: bool,
    top_calls: AtomicUsize,
    item_calls: AtomicUsize,
}

impl FakeSource {
    /// Ranking follows the order of `items`.
    pub fn new(items: Vec<HackerNewsItem>) -> Self {
        Self {
            ranking: items.iter().map(|item| item.id).collect(),
            items: items.into_iter().map(|item| (item.id, item)).collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_ranking: true,
            ..Default::default()
        }
    }

    /// Ranks ids that have no item behind them, so fetching them fails.
    pub fn with_ranking(mut self, ranking: Vec<ItemId>) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_delay(mut self, id: ItemId, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    /// Fetching `id` panics inside the fetch task.
    pub fn with_panic(mut self, id: ItemId) -> Self {
        self.panics.insert(id);
        self
    }

    pub fn top_calls(&self) -> usize {
        self.top_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemSource for FakeSource {
    async fn top_item_ids(&self) -> Result<Vec<ItemId>> {
        self.top_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_ranking {
            return Err(anyhow!("upstream unreachable"));
        }
        Ok(self.ranking.clone())
    }

    async fn get_item(&self, id: ItemId) -> Result<HackerNewsItem> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        if self.panics.contains(&id) {
            panic!("fetching item {} blew up", id);
        }
        self.items
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("Item {} not found", id))
    }
}
