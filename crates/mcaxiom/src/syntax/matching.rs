//! One-way matching of rule schemata against concrete formulas

use super::formula::{Connective, Formula, FormulaKind};
use super::substitution::Substitution;

/// Reasons a pattern fails to match a formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFailure {
    /// Variable already bound to a different formula
    BindingClash(String),
    /// Connectives differ
    ConnectiveClash(Connective, Connective),
    /// A compound pattern met a propositional variable
    CompoundAgainstProp(Connective),
}

/// One-way match: find σ such that `pattern`σ = `target`.
/// Only variables of the pattern are bound; the target is treated as ground.
pub fn match_formula(pattern: &Formula, target: &Formula) -> Result<Substitution, MatchFailure> {
    let mut subst = Substitution::new();
    match_with_subst(pattern, target, &mut subst)?;
    Ok(subst)
}

/// Extend `subst` so that `pattern`σ = `target`. On failure `subst` may hold
/// partial bindings; callers that backtrack work on a copy.
pub fn match_with_subst(
    pattern: &Formula,
    target: &Formula,
    subst: &mut Substitution,
) -> Result<(), MatchFailure> {
    match (pattern.kind(), target.kind()) {
        (FormulaKind::Prop(var), _) => {
            if let Some(bound) = subst.get(var) {
                if bound == target {
                    Ok(())
                } else {
                    Err(MatchFailure::BindingClash(var.clone()))
                }
            } else {
                subst.insert(var.clone(), target.clone());
                Ok(())
            }
        }
        (FormulaKind::Compound(c1, args1), FormulaKind::Compound(c2, args2)) => {
            if c1 != c2 {
                return Err(MatchFailure::ConnectiveClash(c1.clone(), c2.clone()));
            }
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                match_with_subst(arg1, arg2, subst)?;
            }
            Ok(())
        }
        (FormulaKind::Compound(c, _), FormulaKind::Prop(_)) => {
            Err(MatchFailure::CompoundAgainstProp(c.clone()))
        }
    }
}
