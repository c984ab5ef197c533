//! Site-wide banner settings.

use serde::{Deserialize, Serialize};

/// Separator between marquee repetitions.
const MARQUEE_SEPARATOR: &str = " • ";

/// How many times the marquee text is repeated on the announcement bar.
const MARQUEE_REPEAT: usize = 3;

/// The site settings singleton edited from the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub promo_banner: String,
    pub marquee_text: String,
    pub announcement_active: bool,
}

impl SiteSettings {
    /// The scrolling announcement line, or `None` when it is switched off.
    #[must_use]
    pub fn announcement_line(&self) -> Option<String> {
        self.announcement_active
            .then(|| vec![self.marquee_text.as_str(); MARQUEE_REPEAT].join(MARQUEE_SEPARATOR))
    }
}

/// A partial edit of [`SiteSettings`]; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub promo_banner: Option<String>,
    pub marquee_text: Option<String>,
    pub announcement_active: Option<bool>,
}

impl SettingsUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.promo_banner.is_none()
            && self.marquee_text.is_none()
            && self.announcement_active.is_none()
    }

    /// Apply the edit on top of `settings`.
    #[must_use]
    pub fn apply(&self, settings: &SiteSettings) -> SiteSettings {
        SiteSettings {
            promo_banner: self
                .promo_banner
                .clone()
                .unwrap_or_else(|| settings.promo_banner.clone()),
            marquee_text: self
                .marquee_text
                .clone()
                .unwrap_or_else(|| settings.marquee_text.clone()),
            announcement_active: self
                .announcement_active
                .unwrap_or(settings.announcement_active),
        }
    }
}
