//! Propositional syntax
//!
//! Connectives, signatures, formulas, substitutions and one-way matching.

pub mod formula;
pub mod matching;
pub mod substitution;

pub use formula::{numbered_props, Connective, Formula, FormulaKind, FormulaSet, Signature};
pub use matching::{match_formula, match_with_subst, MatchFailure};
pub use substitution::{all_substitutions, apply_to_set, Substitution};
