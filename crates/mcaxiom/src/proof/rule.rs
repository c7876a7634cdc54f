//! Multiple-conclusion rules

use super::sequent::NdSequent;
use crate::error::{Error, Result};
use crate::syntax::{FormulaSet, Substitution};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Ordered set of rules, deduplicated by sequent
pub type RuleSet = BTreeSet<MultipleConclusionRule>;

/// A named sequent together with the correspondence telling, for each
/// logical dimension, which position holds its premises and which its
/// conclusions.
///
/// Premises and conclusions are cached per dimension at construction.
/// Equality, order and hashing look at the sequent only.
#[derive(Debug, Clone)]
pub struct MultipleConclusionRule {
    name: String,
    group: String,
    sequent: NdSequent,
    correspondence: Vec<(usize, usize)>,
    premises: Vec<FormulaSet>,
    conclusions: Vec<FormulaSet>,
    all_conclusions_empty: bool,
}

impl MultipleConclusionRule {
    pub fn new(
        name: impl Into<String>,
        sequent: NdSequent,
        correspondence: Vec<(usize, usize)>,
    ) -> Result<Self> {
        let mut premises = Vec::with_capacity(correspondence.len());
        let mut conclusions = Vec::with_capacity(correspondence.len());
        for &(premise, conclusion) in &correspondence {
            premises.push(sequent.at(premise)?.clone());
            conclusions.push(sequent.at(conclusion)?.clone());
        }
        let all_conclusions_empty = conclusions.iter().all(FormulaSet::is_empty);
        Ok(MultipleConclusionRule {
            name: name.into(),
            group: String::new(),
            sequent,
            correspondence,
            premises,
            conclusions,
            all_conclusions_empty,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn sequent(&self) -> &NdSequent {
        &self.sequent
    }

    pub fn correspondence(&self) -> &[(usize, usize)] {
        &self.correspondence
    }

    /// Number of logical dimensions
    pub fn dimensions(&self) -> usize {
        self.correspondence.len()
    }

    /// Premises, one set per dimension
    pub fn premises(&self) -> &[FormulaSet] {
        &self.premises
    }

    /// Conclusions, one set per dimension
    pub fn conclusions(&self) -> &[FormulaSet] {
        &self.conclusions
    }

    /// True for axioms: rules that close a branch unconditionally
    pub fn all_conclusions_empty(&self) -> bool {
        self.all_conclusions_empty
    }

    pub fn is_dilution_of(&self, other: &MultipleConclusionRule) -> bool {
        self.sequent.is_dilution_of(&other.sequent)
    }

    pub fn total_size(&self) -> usize {
        self.sequent.total_size()
    }

    pub fn collect_props(&self) -> BTreeSet<String> {
        self.sequent.collect_props()
    }

    /// Substitution instance, keeping name, group and correspondence
    pub fn instantiate(&self, subst: &Substitution) -> MultipleConclusionRule {
        self.rebuilt(self.sequent.apply_substitution(subst))
    }

    /// Same rule over another sequent of the same dimension
    pub fn with_sequent(&self, sequent: NdSequent) -> Result<MultipleConclusionRule> {
        if sequent.dimension() != self.sequent.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.sequent.dimension(),
                got: sequent.dimension(),
            });
        }
        Ok(self.rebuilt(sequent))
    }

    /// Same rule with one position replaced
    pub fn with_position(&self, position: usize, formulas: FormulaSet) -> Result<MultipleConclusionRule> {
        let mut sequent = self.sequent.clone();
        sequent.set(position, formulas)?;
        Ok(self.rebuilt(sequent))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> MultipleConclusionRule {
        self.name = name.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> MultipleConclusionRule {
        self.group = group.into();
        self
    }

    // Positions were validated when `self` was built and the dimension is kept
    fn rebuilt(&self, sequent: NdSequent) -> MultipleConclusionRule {
        let premises: Vec<FormulaSet> = self
            .correspondence
            .iter()
            .map(|&(p, _)| sequent[p].clone())
            .collect();
        let conclusions: Vec<FormulaSet> = self
            .correspondence
            .iter()
            .map(|&(_, c)| sequent[c].clone())
            .collect();
        let all_conclusions_empty = conclusions.iter().all(FormulaSet::is_empty);
        MultipleConclusionRule {
            name: self.name.clone(),
            group: self.group.clone(),
            sequent,
            correspondence: self.correspondence.clone(),
            premises,
            conclusions,
            all_conclusions_empty,
        }
    }
}

impl PartialEq for MultipleConclusionRule {
    fn eq(&self, other: &Self) -> bool {
        self.sequent == other.sequent
    }
}

impl Eq for MultipleConclusionRule {}

impl PartialOrd for MultipleConclusionRule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MultipleConclusionRule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequent.cmp(&other.sequent)
    }
}

impl Hash for MultipleConclusionRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sequent.hash(state);
    }
}

impl fmt::Display for MultipleConclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.sequent)
        } else {
            write!(f, "{}: {}", self.name, self.sequent)
        }
    }
}
