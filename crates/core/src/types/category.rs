//! Product categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a category name is not one of [`Category::ALL`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category `{0}` (expected one of Sarees, Lehengas, Suits, Kurtis)")]
pub struct UnknownCategory(pub String);

/// The fixed set of catalog categories.
///
/// Serialized with the display names the stored catalog uses (`"Sarees"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Sarees,
    Lehengas,
    Suits,
    Kurtis,
}

impl Category {
    /// All categories in navigation order.
    pub const ALL: [Self; 4] = [Self::Sarees, Self::Lehengas, Self::Suits, Self::Kurtis];

    /// Display name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sarees => "Sarees",
            Self::Lehengas => "Lehengas",
            Self::Suits => "Suits",
            Self::Kurtis => "Kurtis",
        }
    }

    /// Parse a shop filter value where `All` (any case) means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCategory`] if the value is neither `All` nor a category.
    pub fn parse_filter(s: &str) -> Result<Option<Self>, UnknownCategory> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
