//! Numeric reply classification.
//!
//! Three-digit replies only mean something by convention over ranges of
//! codes. [`CATEGORY_TABLE`] is the ordered, disjoint partition the client
//! uses to decide how a numeric is displayed.

use std::ops::RangeInclusive;

/// How a numeric reply is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Welcome and stats banners. Body only, no source.
    Info,
    Error,
    Names,
    /// WHO/WHOIS replies, shown with an explicit subject.
    Who,
    Topic,
    /// Trace and stats noise. Not displayed.
    Ignored,
    /// Shown verbatim.
    Unknown,
}

/// Ordered `(codes, category)` rules. First match wins; codes outside every
/// range are [`Category::Unknown`].
pub const CATEGORY_TABLE: &[(RangeInclusive<u16>, Category)] = &[
    (0..=4, Category::Info),
    (251..=266, Category::Info),
    (371..=376, Category::Info),
    (400..=u16::MAX, Category::Error),
    (5..=5, Category::Error),
    (365..=368, Category::Names),
    (353..=353, Category::Names),
    (302..=319, Category::Who),
    (352..=352, Category::Who),
    (354..=355, Category::Who),
    (330..=330, Category::Who),
    (360..=360, Category::Who),
    (331..=333, Category::Topic),
    (200..=219, Category::Ignored),
];

impl Category {
    /// Category of an already parsed numeric code.
    pub fn of(code: u16) -> Self {
        CATEGORY_TABLE
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map_or(Category::Unknown, |(_, category)| *category)
    }
}

/// Parse `code` as a numeric reply. Anything that is not an unsigned integer
/// classifies as [`Category::Unknown`].
pub fn classify(code: &str) -> Category {
    code.parse::<u16>().map_or(Category::Unknown, Category::of)
}
