//! Infinite-scroll feed controller for the gallery listing.
//!
//! The controller mirrors what the gallery front-end does: it tracks the
//! current cursor, debounces search input, resets on filter changes, and
//! asks for another page when the sentinel element becomes visible. It is
//! a pure state machine - callers run the fetch it hands out and report
//! the result back - so the paging protocol stays testable without I/O.
//!
//! States: `Idle`, `Loading`, `Exhausted`. A full page returns the
//! controller to `Idle`; a short page means the listing is exhausted.
//! Filter- and search-triggered fetches supersede an in-flight scroll
//! fetch: each reset bumps a generation counter and stale completions are
//! dropped (last write wins, no request cancellation).

use std::time::{Duration, Instant};

use maru_core::{ArtworkQuery, PageCursor};

/// How long search input must be quiet before a refetch fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Feed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Ready to load more when the sentinel shows.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last page came back short; nothing further to load.
    Exhausted,
}

/// A fetch the caller should perform against the listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Generation the response must echo back; stale ones are dropped.
    pub generation: u64,
    /// Filter in effect for this fetch.
    pub query: ArtworkQuery,
    /// Position to resume from; `None` fetches the first page.
    pub cursor: Option<PageCursor>,
}

/// Pending (not yet debounced) search input.
#[derive(Debug, Clone)]
struct PendingSearch {
    text: String,
    entered_at: Instant,
}

/// Client-side paging state machine for the gallery listing.
#[derive(Debug)]
pub struct FeedController<T> {
    phase: FeedPhase,
    query: ArtworkQuery,
    cursor: Option<PageCursor>,
    items: Vec<T>,
    generation: u64,
    page_size: usize,
    pending_search: Option<PendingSearch>,
}

impl<T> FeedController<T> {
    /// Create a controller for the given initial filter and page size.
    #[must_use]
    pub const fn new(query: ArtworkQuery, page_size: usize) -> Self {
        Self {
            phase: FeedPhase::Idle,
            query,
            cursor: None,
            items: Vec::new(),
            generation: 0,
            page_size,
            pending_search: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// Accumulated items, in listing order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Filter currently in effect.
    #[must_use]
    pub const fn query(&self) -> &ArtworkQuery {
        &self.query
    }

    /// The sentinel element became visible.
    ///
    /// Yields a fetch only while `Idle`; scrolling during a load or after
    /// exhaustion does nothing.
    pub fn sentinel_visible(&mut self) -> Option<FetchRequest> {
        if self.phase != FeedPhase::Idle {
            return None;
        }
        self.phase = FeedPhase::Loading;
        Some(FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
            cursor: self.cursor,
        })
    }

    /// The filter changed: clear everything and refetch from the top.
    ///
    /// The returned fetch supersedes any in-flight one.
    pub fn filter_changed(&mut self, query: ArtworkQuery) -> FetchRequest {
        self.query = query;
        self.reset_and_fetch()
    }

    /// Search text changed; the refetch fires once input has been quiet
    /// for [`SEARCH_DEBOUNCE`].
    pub fn search_input(&mut self, text: &str, now: Instant) {
        self.pending_search = Some(PendingSearch {
            text: text.to_owned(),
            entered_at: now,
        });
    }

    /// Advance the debounce clock.
    ///
    /// Returns a reset fetch when pending search input has settled.
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        let pending = self.pending_search.as_ref()?;
        if now.duration_since(pending.entered_at) < SEARCH_DEBOUNCE {
            return None;
        }

        let text = self
            .pending_search
            .take()
            .map(|p| p.text)
            .unwrap_or_default();
        self.query.search = {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        };
        Some(self.reset_and_fetch())
    }

    /// A fetch completed.
    ///
    /// Stale responses (older generation) are dropped. A full page keeps
    /// the feed `Idle`; a short page exhausts it.
    pub fn page_loaded(&mut self, generation: u64, items: Vec<T>, next_cursor: Option<PageCursor>) {
        if generation != self.generation {
            // A reset superseded this fetch while it was in flight.
            return;
        }

        let full_page = items.len() >= self.page_size;
        self.items.extend(items);
        if let Some(cursor) = next_cursor {
            self.cursor = Some(cursor);
        }
        self.phase = if full_page {
            FeedPhase::Idle
        } else {
            FeedPhase::Exhausted
        };
    }

    /// A fetch failed; return to `Idle` so the sentinel can retry.
    pub fn page_failed(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.phase = FeedPhase::Idle;
    }

    fn reset_and_fetch(&mut self) -> FetchRequest {
        self.generation += 1;
        self.cursor = None;
        self.items.clear();
        self.phase = FeedPhase::Loading;
        FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
            cursor: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn cursor(id: i32) -> PageCursor {
        PageCursor::new(Utc.timestamp_opt(1_760_000_000, 0).unwrap(), id)
    }

    fn controller() -> FeedController<i32> {
        FeedController::new(ArtworkQuery::default(), 3)
    }

    #[test]
    fn test_sentinel_fetches_only_when_idle() {
        let mut feed = controller();
        let fetch = feed.sentinel_visible().unwrap();
        assert_eq!(fetch.cursor, None);
        assert_eq!(feed.phase(), FeedPhase::Loading);

        // A second sentinel event during the load is ignored.
        assert!(feed.sentinel_visible().is_none());
    }

    #[test]
    fn test_full_page_returns_to_idle_and_advances_cursor() {
        let mut feed = controller();
        let fetch = feed.sentinel_visible().unwrap();

        feed.page_loaded(fetch.generation, vec![1, 2, 3], Some(cursor(3)));
        assert_eq!(feed.phase(), FeedPhase::Idle);
        assert_eq!(feed.items(), &[1, 2, 3]);

        let next = feed.sentinel_visible().unwrap();
        assert_eq!(next.cursor, Some(cursor(3)));
    }

    #[test]
    fn test_short_page_exhausts_the_feed() {
        let mut feed = controller();
        let fetch = feed.sentinel_visible().unwrap();

        feed.page_loaded(fetch.generation, vec![1, 2], Some(cursor(2)));
        assert_eq!(feed.phase(), FeedPhase::Exhausted);

        // Exhausted feeds ignore the sentinel.
        assert!(feed.sentinel_visible().is_none());
    }

    #[test]
    fn test_filter_change_resets_and_supersedes_inflight_fetch() {
        let mut feed = controller();
        let scroll_fetch = feed.sentinel_visible().unwrap();

        let new_query =
            ArtworkQuery::from_params(Some("painting"), None, None, None, None, None);
        let filter_fetch = feed.filter_changed(new_query.clone());
        assert_eq!(filter_fetch.cursor, None);
        assert_eq!(filter_fetch.query, new_query);

        // The scroll fetch lands late and is dropped.
        feed.page_loaded(scroll_fetch.generation, vec![9, 9, 9], Some(cursor(9)));
        assert!(feed.items().is_empty());
        assert_eq!(feed.phase(), FeedPhase::Loading);

        // The filter fetch lands and wins.
        feed.page_loaded(filter_fetch.generation, vec![1, 2, 3], Some(cursor(3)));
        assert_eq!(feed.items(), &[1, 2, 3]);
        assert_eq!(feed.phase(), FeedPhase::Idle);
    }

    #[test]
    fn test_filter_change_unexhausts() {
        let mut feed = controller();
        let fetch = feed.sentinel_visible().unwrap();
        feed.page_loaded(fetch.generation, vec![1], None);
        assert_eq!(feed.phase(), FeedPhase::Exhausted);

        feed.filter_changed(ArtworkQuery::default());
        assert_eq!(feed.phase(), FeedPhase::Loading);
    }

    #[test]
    fn test_search_debounce_waits_500ms() {
        let mut feed = controller();
        let t0 = Instant::now();

        feed.search_input("moon", t0);
        assert!(feed.tick(t0 + Duration::from_millis(499)).is_none());

        let fetch = feed.tick(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(fetch.query.search.as_deref(), Some("moon"));
        assert_eq!(fetch.cursor, None);

        // The pending entry is consumed; nothing fires again.
        assert!(feed.tick(t0 + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_search_retype_restarts_the_debounce() {
        let mut feed = controller();
        let t0 = Instant::now();

        feed.search_input("mo", t0);
        feed.search_input("moon", t0 + Duration::from_millis(400));

        // 500ms after the first keystroke, but only 100ms after the second.
        assert!(feed.tick(t0 + Duration::from_millis(500)).is_none());

        let fetch = feed.tick(t0 + Duration::from_millis(900)).unwrap();
        assert_eq!(fetch.query.search.as_deref(), Some("moon"));
    }

    #[test]
    fn test_blank_search_clears_the_predicate() {
        let mut feed = controller();
        let t0 = Instant::now();

        feed.search_input("moon", t0);
        feed.tick(t0 + SEARCH_DEBOUNCE).unwrap();
        assert_eq!(feed.query().search.as_deref(), Some("moon"));

        feed.search_input("   ", t0 + Duration::from_secs(1));
        let fetch = feed.tick(t0 + Duration::from_secs(2)).unwrap();
        assert_eq!(fetch.query.search, None);
    }

    #[test]
    fn test_failed_fetch_allows_retry() {
        let mut feed = controller();
        let fetch = feed.sentinel_visible().unwrap();
        feed.page_failed(fetch.generation);
        assert_eq!(feed.phase(), FeedPhase::Idle);
        assert!(feed.sentinel_visible().is_some());
    }
}
