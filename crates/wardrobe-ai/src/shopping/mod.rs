//! Wardrobe gap analysis, curated picks, and marketplace links.

pub mod catalog;
pub mod links;
pub mod recommendations;
pub mod router;


pub use catalog::{curated_products, ShoppingProduct};
pub use links::{search_link, shopping_links, ShoppingLinks};
pub use recommendations::{missing_categories, recommend, ShoppingRecommendations, GAP_FILLER_LIMIT};
pub use router::shopping_router;
