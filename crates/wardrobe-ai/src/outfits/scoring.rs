use serde::Serialize;

use super::context::NormalizedContext;
use crate::wardrobe::{ItemCategory, WardrobeItem};

pub const STYLE_MATCH_POINTS: u32 = 30;
pub const COLOR_MATCH_POINTS: u32 = 25;
pub const NEUTRAL_PALETTE_POINTS: u32 = 20;
pub const PASTEL_PALETTE_POINTS: u32 = 20;
pub const RAIN_FOOTWEAR_POINTS: u32 = 15;
pub const SUNNY_LIGHT_POINTS: u32 = 10;
pub const COLD_TOP_POINTS: u32 = 15;

const NEUTRAL_SHADES: [&str; 3] = ["white", "grey", "cream"];
const PASTEL_SHADES: [&str; 4] = ["pink", "sky", "mint", "lavender"];
const LIGHT_SHADES: [&str; 2] = ["light", "white"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    OccasionStyle,
    PreferredColor,
    NeutralPalette,
    PastelPalette,
    RainFootwear,
    SunnyLight,
    ColdTop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u32,
    pub notes: String,
}

/// One catalog item with its deterministic base score kept apart from the jitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub item: WardrobeItem,
    pub base_score: u32,
    pub jitter: f64,
    pub components: Vec<ScoreComponent>,
}

impl ScoredCandidate {
    pub fn score(&self) -> f64 {
        f64::from(self.base_score) + self.jitter
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Additive attribute bonuses for a single item.
pub fn base_score(item: &WardrobeItem, context: &NormalizedContext) -> (u32, Vec<ScoreComponent>) {
    let mut components = Vec::new();
    let item_color = item.color.to_lowercase();

    if let Some(style) = context.style {
        if style.matches(&item.style) {
            components.push(ScoreComponent {
                factor: ScoreFactor::OccasionStyle,
                points: STYLE_MATCH_POINTS,
                notes: format!("style matches {style} occasion"),
            });
        }
    }

    if let Some(preferred) = context.preferred_color.as_deref() {
        if item_color.contains(preferred) {
            components.push(ScoreComponent {
                factor: ScoreFactor::PreferredColor,
                points: COLOR_MATCH_POINTS,
                notes: format!("color '{}' contains '{preferred}'", item.color),
            });
        }
        if preferred.contains("neutral") && contains_any(&item_color, &NEUTRAL_SHADES) {
            components.push(ScoreComponent {
                factor: ScoreFactor::NeutralPalette,
                points: NEUTRAL_PALETTE_POINTS,
                notes: "neutral shade".to_string(),
            });
        }
        if preferred.contains("pastel") && contains_any(&item_color, &PASTEL_SHADES) {
            components.push(ScoreComponent {
                factor: ScoreFactor::PastelPalette,
                points: PASTEL_PALETTE_POINTS,
                notes: "pastel shade".to_string(),
            });
        }
    }

    let weather = context.weather.as_str();
    if weather.contains("rain") && item.category == ItemCategory::Footwear {
        components.push(ScoreComponent {
            factor: ScoreFactor::RainFootwear,
            points: RAIN_FOOTWEAR_POINTS,
            notes: "footwear for rain".to_string(),
        });
    }
    if contains_any(weather, &["sunny", "warm"]) && contains_any(&item_color, &LIGHT_SHADES) {
        components.push(ScoreComponent {
            factor: ScoreFactor::SunnyLight,
            points: SUNNY_LIGHT_POINTS,
            notes: "light color for warm weather".to_string(),
        });
    }
    if contains_any(weather, &["cold", "winter"]) && item.category == ItemCategory::Top {
        components.push(ScoreComponent {
            factor: ScoreFactor::ColdTop,
            points: COLD_TOP_POINTS,
            notes: "top layer for cold weather".to_string(),
        });
    }

    let total = components.iter().map(|component| component.points).sum();
    (total, components)
}
