//! Configuration types for rule generation, simplification and proof search.

use serde::{Deserialize, Serialize};

/// Order in which candidate rule instances are tried at a search node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceOrder {
    /// Generation order: calculus order, then matching order
    #[default]
    Fixed,
    /// Shuffle the candidates with a seeded generator
    Shuffled { seed: u64 },
}

/// Configuration for the derivability oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Rounds of substitution into the generating formulas
    pub analyticity_level: usize,
    /// Nodes at this depth close only by the target or an axiom instance
    pub max_depth: Option<usize>,
    pub instance_order: InstanceOrder,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            analyticity_level: 1,
            max_depth: None,
            instance_order: InstanceOrder::Fixed,
        }
    }
}

/// Passes run by `RuleSimplifier::simplify_calculus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyOptions {
    pub remove_overlaps: bool,
    pub remove_dilutions: bool,
    /// Rounds of cut saturation, each followed by dilution removal
    pub cut_rounds: usize,
    pub subrule_derivation: bool,
    pub search: SearchConfig,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        SimplifyOptions {
            remove_overlaps: true,
            remove_dilutions: true,
            cut_rounds: 2,
            subrule_derivation: false,
            search: SearchConfig::default(),
        }
    }
}

/// Configuration for the axiomatizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxiomatizerConfig {
    /// Drop rules with overlapping opposed positions from each family
    pub simplify_overlap: bool,
    /// Drop dilutions from each family
    pub simplify_dilution: bool,
    /// Encode allowed outputs of deterministic rows instead of forbidden ones
    pub deterministic_sigma: bool,
    /// Replace rules by their smallest derivable subrules
    pub subrule_derivation: bool,
    /// Enables derivation-based redundancy elimination, bounded by this depth
    pub derivation_max_depth: Option<usize>,
    pub search: SearchConfig,
}

impl Default for AxiomatizerConfig {
    fn default() -> Self {
        AxiomatizerConfig {
            simplify_overlap: true,
            simplify_dilution: true,
            deterministic_sigma: false,
            subrule_derivation: false,
            derivation_max_depth: None,
            search: SearchConfig::default(),
        }
    }
}

impl AxiomatizerConfig {
    /// The simplifier options matching this configuration
    pub fn simplify_options(&self) -> SimplifyOptions {
        SimplifyOptions {
            remove_overlaps: self.simplify_overlap,
            remove_dilutions: self.simplify_dilution,
            subrule_derivation: self.subrule_derivation,
            search: self.search.clone(),
            ..SimplifyOptions::default()
        }
    }
}
