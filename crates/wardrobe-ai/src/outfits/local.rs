//! Lightweight top-three recommender that ranks items without the per-category selector.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::context::OutfitContext;
use crate::wardrobe::WardrobeItem;

pub const RECOMMENDATION_LIMIT: usize = 3;

const OCCASION_POINTS: u32 = 3;
const WEATHER_POINTS: u32 = 2;
const COLOR_POINTS: u32 = 1;
const IMAGE_POINTS: u32 = 1;

static COLD_WEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)jacket|coat|sweater|hoodie").expect("valid regex"));
static HOT_WEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)t-?shirt|shorts|tank").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub item: WardrobeItem,
    pub score: u32,
}

fn local_score(item: &WardrobeItem, context: &OutfitContext) -> u32 {
    let mut score = 0;
    let occasion = context.occasion.trim().to_lowercase();
    if !occasion.is_empty() && item.category.as_str().contains(&occasion) {
        score += OCCASION_POINTS;
    }

    // Garment keywords are looked up in the category and the item name.
    let garment = format!("{} {}", item.category, item.name);
    match context.weather.trim().to_lowercase().as_str() {
        "cold" if COLD_WEAR.is_match(&garment) => score += WEATHER_POINTS,
        "hot" if HOT_WEAR.is_match(&garment) => score += WEATHER_POINTS,
        _ => {}
    }

    let color = context.preferred_color.trim();
    if !color.is_empty() && item.color.eq_ignore_ascii_case(color) {
        score += COLOR_POINTS;
    }
    if !item.image.trim().is_empty() {
        score += IMAGE_POINTS;
    }
    score
}

/// Ranks the catalog and keeps the best item from each of up to three categories.
pub fn recommend_local(items: &[WardrobeItem], context: &OutfitContext) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = items
        .iter()
        .map(|item| RankedItem {
            score: local_score(item, context),
            item: item.clone(),
        })
        .collect();
    ranked.sort_by(|left, right| right.score.cmp(&left.score));

    let mut used = BTreeSet::new();
    ranked
        .into_iter()
        .filter(|candidate| used.insert(candidate.item.category))
        .take(RECOMMENDATION_LIMIT)
        .collect()
}
