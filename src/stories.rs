//! Fetching and ranking of the stories shown on the front page.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

use crate::hn_client::ItemSource;
use crate::models::{is_story_link, ItemId, StoryItem};

/// Fetches every id concurrently and keeps the link stories among them.
///
/// One task is spawned per id, with no cap on how many are in flight. Items
/// that fail to load are skipped. The result is in completion order, not
/// ranking order.
pub async fn fetch_stories<S>(source: &Arc<S>, ids: &[ItemId]) -> Vec<StoryItem>
where
    S: ItemSource + ?Sized + 'static,
{
    let mut tasks = JoinSet::new();
    for &id in ids {
        let source = Arc::clone(source);
        tasks.spawn(async move { (id, source.get_item(id).await) });
    }

    // Every spawned task is joined exactly once, whether it produced an item or not
    let mut stories = Vec::with_capacity(ids.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(item))) => {
                if is_story_link(&item) {
                    stories.push(StoryItem::from_item(item));
                }
            }
            Ok((id, Err(e))) => debug!("Skipping item {}: {:#}", id, e),
            Err(e) => debug!("Item fetch task did not complete: {}", e),
        }
    }

    stories
}

/// Collects up to `num_stories` link stories from the top of the ranking, in ranking order.
///
/// Non-story and failed ids still use up their slot in the ranking, so rounds
/// are repeated on the following ids until enough stories are found or the
/// ranking runs out. In the latter case the stories found so far are returned.
pub async fn get_top_stories<S>(source: &Arc<S>, num_stories: usize) -> Result<Vec<StoryItem>>
where
    S: ItemSource + ?Sized + 'static,
{
    let ids = source
        .top_item_ids()
        .await
        .context("Failed to fetch top story ids")?;

    let mut stories = Vec::with_capacity(num_stories.min(ids.len()));
    let mut cursor = 0;

    while stories.len() < num_stories && cursor < ids.len() {
        let remaining = num_stories - stories.len();
        let end = cursor.saturating_add(remaining).min(ids.len());
        stories.extend(fetch_stories(source, &ids[cursor..end]).await);
        cursor = end;
    }

    if stories.len() < num_stories {
        debug!(
            "Ranking exhausted after {} ids with {} of {} stories",
            ids.len(),
            stories.len(),
            num_stories
        );
    }

    Ok(sort_stories(stories, &ids, num_stories))
}

/// Orders `stories` by the position of their id in `ranking`, keeping at most `limit`.
/// Stories whose id is not ranked are dropped.
pub fn sort_stories(stories: Vec<StoryItem>, ranking: &[ItemId], limit: usize) -> Vec<StoryItem> {
    let mut by_id: HashMap<ItemId, StoryItem> =
        stories.into_iter().map(|story| (story.id(), story)).collect();

    let limit = limit.min(by_id.len());
    let mut sorted = Vec::with_capacity(limit);
    for id in ranking {
        if sorted.len() >= limit {
            break;
        }
        if let Some(story) = by_id.remove(id) {
            sorted.push(story);
        }
    }
    sorted
}
