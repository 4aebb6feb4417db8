pub mod config;
pub mod error;
pub mod events;
pub mod identity;
pub mod outfits;
pub mod shopping;
pub mod storage;
pub mod telemetry;
pub mod wardrobe;

#[cfg(test)]
pub(crate) mod test_support;
