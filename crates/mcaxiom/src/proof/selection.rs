//! Instance selection strategies
//!
//! At every search node the engine collects the applicable rule instances and
//! lets an [`InstanceSelector`] order them before trying them one after the
//! other. The order decides which derivation is found first, never whether
//! one exists.

use super::rule::MultipleConclusionRule;
use crate::config::InstanceOrder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub trait InstanceSelector {
    /// Reorder the candidates in place
    fn order(&mut self, instances: &mut Vec<MultipleConclusionRule>);

    /// Selector name for logging
    fn name(&self) -> &str;
}

/// Keep generation order
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder;

impl InstanceSelector for FixedOrder {
    fn order(&mut self, _instances: &mut Vec<MultipleConclusionRule>) {}

    fn name(&self) -> &str {
        "Fixed"
    }
}

/// Shuffle with a seeded generator, so runs are reproducible
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: StdRng,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        SeededShuffle {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl InstanceSelector for SeededShuffle {
    fn order(&mut self, instances: &mut Vec<MultipleConclusionRule>) {
        instances.shuffle(&mut self.rng);
    }

    fn name(&self) -> &str {
        "SeededShuffle"
    }
}

pub fn build_selector(order: &InstanceOrder) -> Box<dyn InstanceSelector> {
    match *order {
        InstanceOrder::Fixed => Box::new(FixedOrder),
        InstanceOrder::Shuffled { seed } => Box::new(SeededShuffle::new(seed)),
    }
}
