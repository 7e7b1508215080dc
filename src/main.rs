use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use quiet_hn::cache::StoriesCache;
use quiet_hn::config::Args;
use quiet_hn::hn_client::HackerNewsClient;
use quiet_hn::logging::init_tracing;
use quiet_hn::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let client = HackerNewsClient::with_base_url(&args.api_url)?;
    let cache = StoriesCache::default();
    info!(
        "Serving {} stories from {} (cache expires after {:?})",
        args.num_stories,
        client.base_url(),
        cache.expiration()
    );

    let state = AppState {
        source: Arc::new(client),
        cache: Arc::new(cache),
        num_stories: args.num_stories,
    };

    server::serve(state, args.port).await
}
