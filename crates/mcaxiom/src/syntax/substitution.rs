//! Substitutions of formulas for propositional variables

use super::formula::{Formula, FormulaKind, FormulaSet};
use std::collections::BTreeMap;

/// A substitution mapping propositional variable names to formulas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub map: BTreeMap<String, Formula>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution {
            map: BTreeMap::new(),
        }
    }

    /// Substitution sending a single variable to a formula
    pub fn single(var: impl Into<String>, formula: Formula) -> Self {
        let mut subst = Substitution::new();
        subst.insert(var, formula);
        subst
    }

    pub fn insert(&mut self, var: impl Into<String>, formula: Formula) {
        self.map.insert(var.into(), formula);
    }

    pub fn get(&self, var: &str) -> Option<&Formula> {
        self.map.get(var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Formula {
    /// Apply a substitution to this formula. Unbound variables are kept.
    pub fn apply_substitution(&self, subst: &Substitution) -> Formula {
        match self.kind() {
            FormulaKind::Prop(name) => subst.get(name).cloned().unwrap_or_else(|| self.clone()),
            FormulaKind::Compound(connective, children) => {
                let new_children: Vec<Formula> = children
                    .iter()
                    .map(|child| child.apply_substitution(subst))
                    .collect();
                Formula::compound_unchecked(connective.clone(), new_children)
            }
        }
    }

    /// Substitute `formula` for the variable named `var`
    pub fn substitute(&self, var: &str, formula: &Formula) -> Formula {
        self.apply_substitution(&Substitution::single(var, formula.clone()))
    }
}

/// Apply a substitution to every formula of a set
pub fn apply_to_set(set: &FormulaSet, subst: &Substitution) -> FormulaSet {
    set.iter().map(|f| f.apply_substitution(subst)).collect()
}

/// Every substitution sending each of `vars` to a member of `domain`.
///
/// The empty variable list yields the single empty substitution.
pub fn all_substitutions(vars: &[String], domain: &FormulaSet) -> Vec<Substitution> {
    let choices: Vec<Vec<Formula>> = vars
        .iter()
        .map(|_| domain.iter().cloned().collect())
        .collect();
    crate::combinatorics::cartesian_product(&choices)
        .into_iter()
        .map(|image| {
            let mut subst = Substitution::new();
            for (var, formula) in vars.iter().zip(image) {
                subst.insert(var.clone(), formula);
            }
            subst
        })
        .collect()
}
