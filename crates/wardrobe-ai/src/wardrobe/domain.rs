use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of garment categories. `Footwear` and `Shoes` are distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Top,
    Bottom,
    Traditional,
    Footwear,
    Bags,
    Watch,
    Shoes,
    Accessories,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 8] = [
        ItemCategory::Top,
        ItemCategory::Bottom,
        ItemCategory::Traditional,
        ItemCategory::Footwear,
        ItemCategory::Bags,
        ItemCategory::Watch,
        ItemCategory::Shoes,
        ItemCategory::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Top => "top",
            ItemCategory::Bottom => "bottom",
            ItemCategory::Traditional => "traditional",
            ItemCategory::Footwear => "footwear",
            ItemCategory::Bags => "bags",
            ItemCategory::Watch => "watch",
            ItemCategory::Shoes => "shoes",
            ItemCategory::Accessories => "accessories",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Top => "Tops",
            ItemCategory::Bottom => "Bottoms",
            ItemCategory::Traditional => "Traditional Wear",
            ItemCategory::Footwear => "Footwear",
            ItemCategory::Bags => "Bags",
            ItemCategory::Watch => "Watches",
            ItemCategory::Shoes => "Shoes",
            ItemCategory::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for ItemCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        ItemCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

/// A catalogued garment. Immutable once stored apart from image link refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: ItemId,
    pub category: ItemCategory,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub season: BTreeSet<String>,
    #[serde(default)]
    pub occasions: BTreeSet<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file_name: Option<String>,
}

/// Client payload for the catalog-add operation; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWardrobeItem {
    pub category: ItemCategory,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub season: BTreeSet<String>,
    #[serde(default)]
    pub occasions: BTreeSet<String>,
    #[serde(default)]
    pub image: String,
}

impl NewWardrobeItem {
    pub fn into_item(self, id: ItemId) -> WardrobeItem {
        WardrobeItem {
            id,
            category: self.category,
            name: self.name.trim().to_string(),
            color: self.color.trim().to_string(),
            style: self.style.trim().to_ascii_lowercase(),
            season: self.season,
            occasions: self.occasions,
            image: self.image,
            image_file_name: None,
        }
    }
}
