//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::cache::{HighlightCache, build_highlight_cache};
use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::services::mailer::{Mailer, MailerError};

/// Errors that can occur while building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Content directory could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// SMTP transport could not be built.
    #[error("mailer error: {0}")]
    Mailer(#[from] MailerError),
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    content: ContentStore,
    highlights: HighlightCache,
    mailer: Option<Mailer>,
}

impl AppState {
    /// Build the application state.
    ///
    /// Loads markdown content from disk and constructs the SMTP transport
    /// when configured.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the content directory or SMTP configuration
    /// is unusable.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, StateError> {
        let content = ContentStore::load(&config.content_dir)?;
        let highlights =
            build_highlight_cache(Duration::from_secs(config.highlight_cache_ttl_secs));
        let mailer = config.smtp.as_ref().map(Mailer::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                content,
                highlights,
                mailer,
            }),
        })
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Markdown content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Home highlight cache.
    #[must_use]
    pub fn highlights(&self) -> &HighlightCache {
        &self.inner.highlights
    }

    /// SMTP mailer, when configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&Mailer> {
        self.inner.mailer.as_ref()
    }
}
