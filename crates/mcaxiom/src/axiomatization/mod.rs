//! Axiomatization of generalized matrices by multiple-conclusion calculi
//!
//! [`Axiomatizer`] generates the rule families, [`RuleSimplifier`] prunes
//! them and [`simplify_by_derivation`] drops rules the others derive.

pub mod generator;
pub mod layout;
pub mod redundancy;
pub mod simplify;

#[cfg(test)]
mod proptest_tests;

pub use generator::Axiomatizer;
pub use layout::DimensionLayout;
pub use redundancy::{simplify_by_derivation, ReductionOutcome};
pub use simplify::RuleSimplifier;
