//! Keyset pagination cursor for listing queries.
//!
//! Listings are ordered by `(created_at DESC, id DESC)`; a cursor names the
//! last row of a page and the next page starts strictly after it. The token
//! is opaque to clients: `{created_at_micros}.{id}`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for gallery listings.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Upper bound a client may request.
pub const MAX_PAGE_SIZE: i64 = 48;

/// Position of the last row of a page in the `(created_at, id)` sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Creation time of the last returned row.
    pub created_at: DateTime<Utc>,
    /// Id of the last returned row (tie-break within equal timestamps).
    pub id: i32,
}

impl PageCursor {
    /// Create a cursor from the last row of a page.
    #[must_use]
    pub const fn new(created_at: DateTime<Utc>, id: i32) -> Self {
        Self { created_at, id }
    }

    /// Encode as an opaque token to hand to clients.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}.{}", self.created_at.timestamp_micros(), self.id)
    }

    /// Decode a client-supplied token.
    ///
    /// Malformed tokens yield `None`, which restarts the listing from the
    /// first page - the same permissive posture taken for filter values.
    #[must_use]
    pub fn decode(token: &str) -> Option<Self> {
        let (micros, id) = token.split_once('.')?;
        let micros: i64 = micros.parse().ok()?;
        let id: i32 = id.parse().ok()?;
        let created_at = Utc.timestamp_micros(micros).single()?;
        Some(Self { created_at, id })
    }
}

impl std::fmt::Display for PageCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let cursor = PageCursor::new(Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(), 271);
        let token = cursor.encode();
        assert_eq!(PageCursor::decode(&token), Some(cursor));
    }

    #[test]
    fn test_decode_malformed_is_none() {
        assert_eq!(PageCursor::decode(""), None);
        assert_eq!(PageCursor::decode("garbage"), None);
        assert_eq!(PageCursor::decode("123"), None);
        assert_eq!(PageCursor::decode("123.abc"), None);
        assert_eq!(PageCursor::decode("abc.123"), None);
        assert_eq!(PageCursor::decode("1.2.3"), None);
    }

    #[test]
    fn test_cursor_preserves_microseconds() {
        let created_at = Utc.timestamp_micros(1_772_000_123_456_789).single().unwrap();
        let cursor = PageCursor::new(created_at, 1);
        let decoded = PageCursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded.created_at, created_at);
    }
}
