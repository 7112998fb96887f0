//! Artwork taxonomy used for gallery filtering.
//!
//! Every enum here offers `from_param`, which parses the raw query-string
//! value the storefront receives. Unknown or malformed values yield `None`,
//! i.e. the filter is silently dropped rather than rejected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Artwork medium category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "artwork_category", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Painting,
    Print,
    Photography,
    Sculpture,
    Craft,
    Media,
}

impl Category {
    /// The query-string / interchange value for this category.
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::Painting => "painting",
            Self::Print => "print",
            Self::Photography => "photography",
            Self::Sculpture => "sculpture",
            Self::Craft => "craft",
            Self::Media => "media",
        }
    }

    /// Parse a query-string value; unknown values mean "no filter".
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "painting" => Some(Self::Painting),
            "print" => Some(Self::Print),
            "photography" => Some(Self::Photography),
            "sculpture" => Some(Self::Sculpture),
            "craft" => Some(Self::Craft),
            "media" => Some(Self::Media),
            _ => None,
        }
    }
}

/// Seasonal mood tag assigned by curators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "artwork_season", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// The query-string / interchange value for this season.
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    /// Parse a query-string value; unknown values mean "no filter".
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "autumn" => Some(Self::Autumn),
            "winter" => Some(Self::Winter),
            _ => None,
        }
    }
}

/// Recommended hanging space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "artwork_space", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum SpaceTag {
    LivingRoom,
    Bedroom,
    Office,
    Lobby,
    Cafe,
    Study,
}

impl SpaceTag {
    /// The query-string / interchange value for this space.
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::LivingRoom => "living_room",
            Self::Bedroom => "bedroom",
            Self::Office => "office",
            Self::Lobby => "lobby",
            Self::Cafe => "cafe",
            Self::Study => "study",
        }
    }

    /// Parse a query-string value; unknown values mean "no filter".
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "living_room" => Some(Self::LivingRoom),
            "bedroom" => Some(Self::Bedroom),
            "office" => Some(Self::Office),
            "lobby" => Some(Self::Lobby),
            "cafe" => Some(Self::Cafe),
            "study" => Some(Self::Study),
            _ => None,
        }
    }
}

/// Size bucket derived from the longest canvas edge in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBucket {
    /// Longest edge under 30 cm.
    Small,
    /// 30 cm to under 70 cm.
    Medium,
    /// 70 cm to under 120 cm.
    Large,
    /// 120 cm and above.
    ExtraLarge,
}

impl SizeBucket {
    /// Parse a query-string value; unknown values mean "no filter".
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "extra_large" => Some(Self::ExtraLarge),
            _ => None,
        }
    }

    /// Inclusive lower and exclusive upper bound on the longest edge, in cm.
    #[must_use]
    pub fn bounds_cm(&self) -> (Decimal, Option<Decimal>) {
        match self {
            Self::Small => (Decimal::ZERO, Some(Decimal::from(30))),
            Self::Medium => (Decimal::from(30), Some(Decimal::from(70))),
            Self::Large => (Decimal::from(70), Some(Decimal::from(120))),
            Self::ExtraLarge => (Decimal::from(120), None),
        }
    }

    /// Bucket for a canvas with the given edge lengths.
    #[must_use]
    pub fn for_edges(width_cm: Decimal, height_cm: Decimal) -> Self {
        let longest = width_cm.max(height_cm);
        if longest < Decimal::from(30) {
            Self::Small
        } else if longest < Decimal::from(70) {
            Self::Medium
        } else if longest < Decimal::from(120) {
            Self::Large
        } else {
            Self::ExtraLarge
        }
    }
}

/// Price bucket in KRW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    /// Under ₩500,000.
    Under500k,
    /// ₩500,000 to under ₩1,000,000.
    From500kTo1m,
    /// ₩1,000,000 to under ₩3,000,000.
    From1mTo3m,
    /// ₩3,000,000 and above.
    Over3m,
}

impl PriceRange {
    /// Parse a query-string value; unknown values mean "no filter".
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "under_500k" => Some(Self::Under500k),
            "500k_to_1m" => Some(Self::From500kTo1m),
            "1m_to_3m" => Some(Self::From1mTo3m),
            "over_3m" => Some(Self::Over3m),
            _ => None,
        }
    }

    /// Inclusive lower and exclusive upper bound in won.
    #[must_use]
    pub fn bounds_won(&self) -> (Decimal, Option<Decimal>) {
        match self {
            Self::Under500k => (Decimal::ZERO, Some(Decimal::from(500_000))),
            Self::From500kTo1m => (Decimal::from(500_000), Some(Decimal::from(1_000_000))),
            Self::From1mTo3m => (Decimal::from(1_000_000), Some(Decimal::from(3_000_000))),
            Self::Over3m => (Decimal::from(3_000_000), None),
        }
    }
}

/// Filter specification for the gallery listing query.
///
/// All predicates are optional and combined with AND. Built from raw
/// query-string values with [`ArtworkQuery::from_params`], which drops
/// anything it cannot parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkQuery {
    pub category: Option<Category>,
    pub season: Option<Season>,
    pub space: Option<SpaceTag>,
    pub price_range: Option<PriceRange>,
    pub size: Option<SizeBucket>,
    /// Substring match on title or artist name.
    pub search: Option<String>,
}

impl ArtworkQuery {
    /// Build a query from raw parameter strings.
    ///
    /// Malformed values are treated as "no filter"; a blank search string
    /// is dropped.
    #[must_use]
    pub fn from_params(
        category: Option<&str>,
        season: Option<&str>,
        space: Option<&str>,
        price_range: Option<&str>,
        size: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            category: category.and_then(Category::from_param),
            season: season.and_then(Season::from_param),
            space: space.and_then(SpaceTag::from_param),
            price_range: price_range.and_then(PriceRange::from_param),
            size: size.and_then(SizeBucket::from_param),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned),
        }
    }

    /// True when no predicate is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.season.is_none()
            && self.space.is_none()
            && self.price_range.is_none()
            && self.size.is_none()
            && self.search.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_params_are_dropped() {
        let query = ArtworkQuery::from_params(
            Some("oil-on-canvas"),
            Some("monsoon"),
            Some("garage"),
            Some("expensive"),
            Some("huge"),
            Some("   "),
        );
        assert!(query.is_empty());
    }

    #[test]
    fn test_valid_params_parse() {
        let query = ArtworkQuery::from_params(
            Some("painting"),
            Some("winter"),
            Some("living_room"),
            Some("1m_to_3m"),
            Some("medium"),
            Some("moonlight"),
        );
        assert_eq!(query.category, Some(Category::Painting));
        assert_eq!(query.season, Some(Season::Winter));
        assert_eq!(query.space, Some(SpaceTag::LivingRoom));
        assert_eq!(query.price_range, Some(PriceRange::From1mTo3m));
        assert_eq!(query.size, Some(SizeBucket::Medium));
        assert_eq!(query.search.as_deref(), Some("moonlight"));
    }

    #[test]
    fn test_as_param_roundtrips() {
        for category in [
            Category::Painting,
            Category::Print,
            Category::Photography,
            Category::Sculpture,
            Category::Craft,
            Category::Media,
        ] {
            assert_eq!(Category::from_param(category.as_param()), Some(category));
        }
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            assert_eq!(Season::from_param(season.as_param()), Some(season));
        }
        for space in [
            SpaceTag::LivingRoom,
            SpaceTag::Bedroom,
            SpaceTag::Office,
            SpaceTag::Lobby,
            SpaceTag::Cafe,
            SpaceTag::Study,
        ] {
            assert_eq!(SpaceTag::from_param(space.as_param()), Some(space));
        }
    }

    #[test]
    fn test_price_range_bounds() {
        let (min, max) = PriceRange::From500kTo1m.bounds_won();
        assert_eq!(min, Decimal::from(500_000));
        assert_eq!(max, Some(Decimal::from(1_000_000)));
        assert_eq!(PriceRange::Over3m.bounds_won().1, None);
    }

    #[test]
    fn test_size_bucket_for_edges() {
        let d = Decimal::from;
        assert_eq!(SizeBucket::for_edges(d(20), d(25)), SizeBucket::Small);
        assert_eq!(SizeBucket::for_edges(d(20), d(45)), SizeBucket::Medium);
        assert_eq!(SizeBucket::for_edges(d(100), d(30)), SizeBucket::Large);
        assert_eq!(SizeBucket::for_edges(d(130), d(90)), SizeBucket::ExtraLarge);
    }

    #[test]
    fn test_size_bucket_bounds_align_with_for_edges() {
        for bucket in [
            SizeBucket::Small,
            SizeBucket::Medium,
            SizeBucket::Large,
            SizeBucket::ExtraLarge,
        ] {
            let (min, _) = bucket.bounds_cm();
            assert_eq!(SizeBucket::for_edges(min, min), bucket);
        }
    }
}
