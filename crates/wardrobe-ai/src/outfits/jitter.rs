//! Tie-break jitter sources added on top of the deterministic base score.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::JitterMode;

/// Jitter values are drawn uniformly from `[0, JITTER_RANGE)`.
pub const JITTER_RANGE: f64 = 20.0;

pub trait JitterSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Thread-local entropy; repeated calls with identical input may differ.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadJitter;

impl JitterSource for ThreadJitter {
    fn sample(&self) -> f64 {
        rand::rng().random_range(0.0..JITTER_RANGE)
    }
}

/// Reproducible jitter stream from a fixed seed.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(0.0..JITTER_RANGE)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&self) -> f64 {
        0.0
    }
}

pub fn jitter_source(mode: JitterMode) -> Arc<dyn JitterSource> {
    match mode {
        JitterMode::Random => Arc::new(ThreadJitter),
        JitterMode::Seeded(seed) => Arc::new(SeededJitter::new(seed)),
        JitterMode::Off => Arc::new(NoJitter),
    }
}
