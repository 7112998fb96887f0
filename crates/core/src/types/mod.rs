//! Core types for Maru Gallery.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod paging;
pub mod price;
pub mod status;
pub mod taxonomy;

pub use email::{Email, EmailError};
pub use id::*;
pub use paging::{PageCursor, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use price::{CurrencyCode, Price};
pub use status::*;
pub use taxonomy::{ArtworkQuery, Category, PriceRange, Season, SizeBucket, SpaceTag};
