use std::collections::BTreeSet;

use serde::Serialize;

use super::catalog::{curated_products, ShoppingProduct};
use crate::wardrobe::{ItemCategory, WardrobeItem};

pub const GAP_FILLER_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingRecommendations {
    pub missing_categories: Vec<ItemCategory>,
    pub recommendations: Vec<ShoppingProduct>,
    pub gap_fillers: Vec<ShoppingProduct>,
    pub trending: Vec<ShoppingProduct>,
}

/// Catalog categories with no item, in enumeration order.
pub fn missing_categories(items: &[WardrobeItem]) -> Vec<ItemCategory> {
    let owned: BTreeSet<ItemCategory> = items.iter().map(|item| item.category).collect();
    ItemCategory::ALL
        .into_iter()
        .filter(|category| !owned.contains(category))
        .collect()
}

pub fn recommend(items: &[WardrobeItem]) -> ShoppingRecommendations {
    let missing = missing_categories(items);
    let mut recommendations = curated_products();
    // Stable: products keep their curated order within each group.
    recommendations.sort_by_key(|product| !missing.contains(&product.category));

    let gap_fillers = recommendations
        .iter()
        .take(GAP_FILLER_LIMIT)
        .cloned()
        .collect();
    let trending = recommendations
        .iter()
        .filter(|product| product.trending)
        .cloned()
        .collect();

    ShoppingRecommendations {
        missing_categories: missing,
        recommendations,
        gap_fillers,
        trending,
    }
}
