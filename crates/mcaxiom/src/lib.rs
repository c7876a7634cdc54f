//! mcaxiom: multiple-conclusion axiomatization of partial non-deterministic
//! matrices
//!
//! Given a generalized matrix and a discriminator for it, this library
//! generates a multiple-conclusion calculus that axiomatizes the matrix,
//! prunes it by overlap and dilution removal and cut saturation, and can
//! shrink it further with a bounded derivability oracle.

pub mod axiomatization;
pub mod combinatorics;
pub mod config;
pub mod error;
pub mod proof;
pub mod semantics;
pub mod syntax;

pub use error::{Error, Result};

// Re-export syntax types
pub use syntax::{
    match_formula, numbered_props, Connective, Formula, FormulaKind, FormulaSet, Signature,
    Substitution,
};

// Re-export semantics types
pub use semantics::{
    CounterExample, Determinant, Discriminator, GenMatrix, SequentValidator, TruthTable,
    Valuation, Value, ValueSet,
};

// Re-export proof types
pub use proof::{
    DerivationTree, DerivationTreeNode, InstanceSelector, MultipleConclusionCalculus,
    MultipleConclusionRule, NdSequent, RuleSet,
};

pub use axiomatization::{
    simplify_by_derivation, Axiomatizer, DimensionLayout, ReductionOutcome, RuleSimplifier,
};

pub use config::{AxiomatizerConfig, InstanceOrder, SearchConfig, SimplifyOptions};
