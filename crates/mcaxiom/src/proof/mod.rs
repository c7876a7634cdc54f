//! Proof theory: N-dimensional sequents, multiple-conclusion rules and
//! calculi, and the bounded derivability oracle.

pub mod analytic;
pub mod calculus;
pub mod rule;
pub mod search;
pub mod selection;
pub mod sequent;


pub use analytic::analytic_universe;
pub use calculus::MultipleConclusionCalculus;
pub use rule::{MultipleConclusionRule, RuleSet};
pub use search::{DerivationSearch, DerivationTree, DerivationTreeNode, SearchStats};
pub use selection::{build_selector, FixedOrder, InstanceSelector, SeededShuffle};
pub use sequent::{NdSequent, Subsequents};
