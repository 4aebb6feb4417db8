//! Outfit scoring and per-category selection.

pub mod context;
pub mod generator;
pub mod jitter;
pub mod local;
pub mod router;
pub mod scoring;


pub use context::{resolve_style, NormalizedContext, OutfitContext, StyleTag, OCCASION_KEYWORDS};
pub use generator::{
    GeneratedOutfit, OutfitError, OutfitGenerator, FIXED_CATEGORIES, TRADITIONAL_WEAR,
};
pub use jitter::{jitter_source, JitterSource, NoJitter, SeededJitter, ThreadJitter, JITTER_RANGE};
pub use local::{recommend_local, RankedItem, RECOMMENDATION_LIMIT};
pub use router::{outfit_router, OutfitService};
pub use scoring::{ScoreComponent, ScoreFactor, ScoredCandidate};
