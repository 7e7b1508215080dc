//! HTTP front end: one page listing the current top stories.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::cache::StoriesCache;
use crate::hn_client::ItemSource;
use crate::models::StoryItem;
use crate::render::{render_page, TemplateData};
use crate::stories::get_top_stories;

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ItemSource>,
    pub cache: Arc<StoriesCache>,
    pub num_stories: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// GET /
async fn index(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let stories = state.cache.get_or_refresh(|| refresh_stories(&state)).await;

    let stories = match stories {
        Ok(stories) => stories,
        Err(e) => {
            error!("Failed to load top stories: {:#}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load top stories").into_response();
        }
    };

    let data = TemplateData {
        stories: &stories,
        elapsed: start.elapsed(),
    };
    match render_page(&data, Utc::now()) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to process the template").into_response()
        }
    }
}

async fn refresh_stories(state: &AppState) -> Result<Vec<StoryItem>> {
    let stories = get_top_stories(&state.source, state.num_stories).await?;
    info!("Refreshed front page with {} stories", stories.len());
    Ok(stories)
}
