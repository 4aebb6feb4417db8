use serde::Serialize;

use super::links::search_link;
use crate::wardrobe::ItemCategory;

/// A curated product suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingProduct {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    pub price: String,
    pub image: String,
    pub store: String,
    pub link: String,
    pub trending: bool,
}

const CURATED: [(&str, ItemCategory, &str, &str, &str, bool); 10] = [
    (
        "Classic White Shirt",
        ItemCategory::Top,
        "$29.99",
        "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=400",
        "Fashion Store",
        true,
    ),
    (
        "Designer Handbag",
        ItemCategory::Bags,
        "$89.99",
        "https://images.unsplash.com/photo-1584917865442-de89df76afd3?w=400",
        "Luxury Boutique",
        true,
    ),
    (
        "Leather Sneakers",
        ItemCategory::Shoes,
        "$69.99",
        "https://images.unsplash.com/photo-1549298916-b41d501d3772?w=400",
        "Shoe Palace",
        false,
    ),
    (
        "Silk Scarf",
        ItemCategory::Accessories,
        "$24.99",
        "https://images.unsplash.com/photo-1601924994987-69e26d50dc26?w=400",
        "Accessory Hub",
        true,
    ),
    (
        "Denim Jeans",
        ItemCategory::Bottom,
        "$49.99",
        "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400",
        "Denim Co",
        false,
    ),
    (
        "Traditional Kurta",
        ItemCategory::Traditional,
        "$59.99",
        "https://images.unsplash.com/photo-1610030469983-98e550d6193c?w=400",
        "Ethnic Wear",
        true,
    ),
    (
        "Smart Watch",
        ItemCategory::Watch,
        "$199.99",
        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=400",
        "Tech Store",
        true,
    ),
    (
        "Chelsea Boots",
        ItemCategory::Footwear,
        "$79.99",
        "https://images.unsplash.com/photo-1608256246200-53e635b5b65f?w=400",
        "Boot Emporium",
        false,
    ),
    (
        "Blazer Jacket",
        ItemCategory::Top,
        "$99.99",
        "https://images.unsplash.com/photo-1507679799987-c73779587ccf?w=400",
        "Business Attire",
        true,
    ),
    (
        "Gold Necklace",
        ItemCategory::Accessories,
        "$149.99",
        "https://images.unsplash.com/photo-1515562141207-7a88fb7ce338?w=400",
        "Jewelry Gallery",
        false,
    ),
];

/// The curated product list in its published order.
pub fn curated_products() -> Vec<ShoppingProduct> {
    CURATED
        .iter()
        .enumerate()
        .map(
            |(index, (name, category, price, image, store, trending))| ShoppingProduct {
                id: (index + 1).to_string(),
                name: name.to_string(),
                category: *category,
                price: price.to_string(),
                image: image.to_string(),
                store: store.to_string(),
                link: search_link(name).unwrap_or_default(),
                trending: *trending,
            },
        )
        .collect()
}
