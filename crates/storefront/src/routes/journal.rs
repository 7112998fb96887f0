//! Journal (editorial content) and static page handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::content::Post;
use crate::error::{AppError, Result};
use crate::response;
use crate::state::AppState;

/// Journal entry summary for the index.
#[derive(Serialize)]
struct PostSummary {
    slug: String,
    title: String,
    description: Option<String>,
    author: Option<String>,
    published_at: NaiveDate,
    featured_image: Option<String>,
    tags: Vec<String>,
    reading_time_minutes: u32,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.meta.title.clone(),
            description: post.meta.description.clone(),
            author: post.meta.author.clone(),
            published_at: post.meta.published_at,
            featured_image: post.meta.featured_image.clone(),
            tags: post.meta.tags.clone(),
            reading_time_minutes: post.reading_time_minutes,
        }
    }
}

/// Published journal entries, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let entries: Vec<PostSummary> = state
        .content()
        .get_published_posts()
        .map(PostSummary::from)
        .collect();

    #[derive(Serialize)]
    struct Index {
        entries: Vec<PostSummary>,
    }

    Ok(response::ok(Index { entries }))
}

/// One journal entry with rendered HTML and recent siblings.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Value>> {
    let post = state
        .content()
        .get_post(&slug)
        .filter(|p| !p.meta.draft)
        .ok_or_else(|| AppError::NotFound(format!("journal entry {slug}")))?;

    let recent: Vec<PostSummary> = state
        .content()
        .get_recent_posts(3, Some(&slug))
        .into_iter()
        .map(PostSummary::from)
        .collect();

    #[derive(Serialize)]
    struct Entry {
        entry: PostSummary,
        content_html: String,
        recent: Vec<PostSummary>,
    }

    Ok(response::ok(Entry {
        entry: PostSummary::from(post),
        content_html: post.content_html.clone(),
        recent,
    }))
}

/// A static page (visit, about, terms).
#[instrument(skip(state))]
pub async fn page(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Value>> {
    let page = state
        .content()
        .get_page(&slug)
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))?;

    #[derive(Serialize)]
    struct PageView {
        slug: String,
        title: String,
        description: Option<String>,
        updated_at: Option<NaiveDate>,
        content_html: String,
    }

    Ok(response::ok(PageView {
        slug: page.slug.clone(),
        title: page.meta.title.clone(),
        description: page.meta.description.clone(),
        updated_at: page.meta.updated_at,
        content_html: page.content_html.clone(),
    }))
}
