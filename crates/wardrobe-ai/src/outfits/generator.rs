use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::context::OutfitContext;
use super::jitter::{jitter_source, JitterSource, NoJitter};
use super::scoring::{base_score, ScoredCandidate};
use crate::config::JitterMode;
use crate::wardrobe::{ItemCategory, WardrobeItem};

/// Categories attempted on every generation, in output order.
pub const FIXED_CATEGORIES: [ItemCategory; 5] = [
    ItemCategory::Top,
    ItemCategory::Bottom,
    ItemCategory::Shoes,
    ItemCategory::Accessories,
    ItemCategory::Bags,
];

pub const TRADITIONAL_WEAR: &str = "traditional wear";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutfitError {
    #[error("Add items to your wardrobe first!")]
    EmptyWardrobe,
    #[error("Please describe at least Occasion, Weather, or Color")]
    InsufficientContext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedOutfit {
    pub items: Vec<WardrobeItem>,
    pub match_percentage: u8,
    pub occasion: String,
    pub weather: String,
    pub preferred_color: String,
    pub missing_categories: Vec<String>,
}

/// Scores a catalog snapshot against a context and picks one item per category.
#[derive(Clone)]
pub struct OutfitGenerator {
    jitter: Arc<dyn JitterSource>,
}

impl OutfitGenerator {
    pub fn new(jitter: Arc<dyn JitterSource>) -> Self {
        Self { jitter }
    }

    pub fn from_mode(mode: JitterMode) -> Self {
        Self::new(jitter_source(mode))
    }

    pub fn deterministic() -> Self {
        Self::new(Arc::new(NoJitter))
    }

    pub fn score(&self, catalog: &[WardrobeItem], context: &OutfitContext) -> Vec<ScoredCandidate> {
        let normalized = context.normalized();
        catalog
            .iter()
            .map(|item| {
                let (base_score, components) = base_score(item, &normalized);
                ScoredCandidate {
                    item: item.clone(),
                    base_score,
                    jitter: self.jitter.sample(),
                    components,
                }
            })
            .collect()
    }

    pub fn generate(
        &self,
        catalog: &[WardrobeItem],
        context: &OutfitContext,
    ) -> Result<GeneratedOutfit, OutfitError> {
        if catalog.is_empty() {
            return Err(OutfitError::EmptyWardrobe);
        }
        if context.is_blank() {
            return Err(OutfitError::InsufficientContext);
        }

        let scored = self.score(catalog, context);
        let mut items = Vec::new();
        let mut missing_categories = Vec::new();

        for category in FIXED_CATEGORIES {
            match best_in(&scored, category) {
                Some(candidate) => items.push(candidate.item.clone()),
                None => missing_categories.push(category.as_str().to_string()),
            }
        }
        let fixed_selected = items.len();

        if context.wants_traditional() {
            match best_in(&scored, ItemCategory::Traditional) {
                Some(candidate) => items.push(candidate.item.clone()),
                None => missing_categories.push(TRADITIONAL_WEAR.to_string()),
            }
        }

        let match_percentage = match_percentage(fixed_selected);
        debug!(
            candidates = scored.len(),
            selected = items.len(),
            match_percentage,
            missing = ?missing_categories,
            "outfit generated"
        );

        Ok(GeneratedOutfit {
            items,
            match_percentage,
            occasion: context.occasion.clone(),
            weather: context.weather.clone(),
            preferred_color: context.preferred_color.clone(),
            missing_categories,
        })
    }
}

// Ties keep the earliest item in catalog order.
fn best_in(scored: &[ScoredCandidate], category: ItemCategory) -> Option<&ScoredCandidate> {
    scored
        .iter()
        .filter(|candidate| candidate.item.category == category)
        .fold(None, |best: Option<&ScoredCandidate>, candidate| match best {
            Some(current) if current.score() >= candidate.score() => Some(current),
            _ => Some(candidate),
        })
}

fn match_percentage(fixed_selected: usize) -> u8 {
    let ratio = fixed_selected.min(FIXED_CATEGORIES.len()) as f64 / FIXED_CATEGORIES.len() as f64;
    (ratio * 100.0).round() as u8
}
