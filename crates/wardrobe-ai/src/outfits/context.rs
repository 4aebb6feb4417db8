use std::fmt;

use serde::{Deserialize, Serialize};

/// Free-text request context for outfit generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitContext {
    #[serde(default)]
    pub occasion: String,
    #[serde(default)]
    pub weather: String,
    #[serde(default, alias = "color")]
    pub preferred_color: String,
}

/// Style tag an occasion resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Formal,
    Casual,
    Party,
    Traditional,
}

impl StyleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleTag::Formal => "formal",
            StyleTag::Casual => "casual",
            StyleTag::Party => "party",
            StyleTag::Traditional => "traditional",
        }
    }

    /// Exact comparison; catalog items store their style lowercased.
    pub fn matches(&self, item_style: &str) -> bool {
        item_style == self.as_str()
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword groups; the first group with a substring hit wins.
pub const OCCASION_KEYWORDS: [(&[&str], StyleTag); 4] = [
    (&["formal", "office", "work"], StyleTag::Formal),
    (&["casual", "weekend"], StyleTag::Casual),
    (&["party", "dinner"], StyleTag::Party),
    (&["traditional", "festival"], StyleTag::Traditional),
];

const TRADITIONAL_KEYWORDS: [&str; 2] = ["traditional", "festival"];

pub fn resolve_style(occasion: &str) -> Option<StyleTag> {
    let occasion = occasion.to_lowercase();
    OCCASION_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| occasion.contains(keyword)))
        .map(|(_, style)| *style)
}

/// Lowercased view of an [`OutfitContext`] used during scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContext {
    pub style: Option<StyleTag>,
    pub weather: String,
    pub preferred_color: Option<String>,
    pub wants_traditional: bool,
}

impl OutfitContext {
    pub fn new(
        occasion: impl Into<String>,
        weather: impl Into<String>,
        preferred_color: impl Into<String>,
    ) -> Self {
        Self {
            occasion: occasion.into(),
            weather: weather.into(),
            preferred_color: preferred_color.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.occasion.trim().is_empty()
            && self.weather.trim().is_empty()
            && self.preferred_color.trim().is_empty()
    }

    pub fn wants_traditional(&self) -> bool {
        let occasion = self.occasion.to_lowercase();
        TRADITIONAL_KEYWORDS
            .iter()
            .any(|keyword| occasion.contains(keyword))
    }

    pub fn normalized(&self) -> NormalizedContext {
        let preferred_color = self.preferred_color.trim().to_lowercase();
        NormalizedContext {
            style: resolve_style(&self.occasion),
            weather: self.weather.to_lowercase(),
            preferred_color: (!preferred_color.is_empty()).then_some(preferred_color),
            wants_traditional: self.wants_traditional(),
        }
    }
}
