//! N-dimensional sequents

use crate::combinatorics::Combinations;
use crate::error::{Error, Result};
use crate::syntax::{Formula, FormulaSet, Signature, Substitution};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Index;

/// A tuple of formula sets of fixed dimension.
///
/// The derived order compares position by position, each position by the
/// formula order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NdSequent {
    sets: Vec<FormulaSet>,
}

impl NdSequent {
    pub fn new(sets: Vec<FormulaSet>) -> Self {
        NdSequent { sets }
    }

    /// A sequent with `dimension` empty positions
    pub fn empty(dimension: usize) -> Self {
        NdSequent {
            sets: vec![FormulaSet::new(); dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.sets.len()
    }

    pub fn get(&self, position: usize) -> Option<&FormulaSet> {
        self.sets.get(position)
    }

    pub fn at(&self, position: usize) -> Result<&FormulaSet> {
        self.sets.get(position).ok_or(Error::PositionOutOfRange {
            position,
            dimension: self.sets.len(),
        })
    }

    pub fn as_slice(&self) -> &[FormulaSet] {
        &self.sets
    }

    pub fn into_sets(self) -> Vec<FormulaSet> {
        self.sets
    }

    pub fn insert(&mut self, position: usize, formula: Formula) -> Result<bool> {
        let dimension = self.sets.len();
        let set = self
            .sets
            .get_mut(position)
            .ok_or(Error::PositionOutOfRange { position, dimension })?;
        Ok(set.insert(formula))
    }

    pub fn set(&mut self, position: usize, formulas: FormulaSet) -> Result<()> {
        let dimension = self.sets.len();
        let slot = self
            .sets
            .get_mut(position)
            .ok_or(Error::PositionOutOfRange { position, dimension })?;
        *slot = formulas;
        Ok(())
    }

    pub fn is_in(&self, position: usize, formula: &Formula) -> bool {
        self.sets
            .get(position)
            .map_or(false, |set| set.contains(formula))
    }

    /// Whether every position of `self` contains the same position of
    /// `other`. Sequents of different dimensions are never dilutions.
    pub fn is_dilution_of(&self, other: &NdSequent) -> bool {
        self.sets.len() == other.sets.len()
            && self
                .sets
                .iter()
                .zip(&other.sets)
                .all(|(mine, theirs)| mine.is_superset(theirs))
    }

    /// Pointwise union
    pub fn union(&self, other: &NdSequent) -> Result<NdSequent> {
        if self.sets.len() != other.sets.len() {
            return Err(Error::DimensionMismatch {
                expected: self.sets.len(),
                got: other.sets.len(),
            });
        }
        Ok(NdSequent {
            sets: self
                .sets
                .iter()
                .zip(&other.sets)
                .map(|(a, b)| a.union(b).cloned().collect())
                .collect(),
        })
    }

    /// Total number of formula occurrences over all positions
    pub fn total_size(&self) -> usize {
        self.sets.iter().map(FormulaSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(FormulaSet::is_empty)
    }

    pub fn collect_formulas(&self) -> FormulaSet {
        self.sets.iter().flatten().cloned().collect()
    }

    pub fn collect_props(&self) -> BTreeSet<String> {
        let mut props = BTreeSet::new();
        for formula in self.sets.iter().flatten() {
            formula.collect_props(&mut props);
        }
        props
    }

    pub fn apply_substitution(&self, subst: &Substitution) -> NdSequent {
        NdSequent {
            sets: self
                .sets
                .iter()
                .map(|set| crate::syntax::apply_to_set(set, subst))
                .collect(),
        }
    }

    /// The least signature containing every connective of the sequent
    pub fn infer_signature(&self) -> Signature {
        let mut signature = Signature::new();
        for formula in self.sets.iter().flatten() {
            formula.collect_signature(&mut signature);
        }
        signature
    }

    /// The proper, non-empty subsequents, smallest first
    pub fn subsequents(&self) -> Subsequents {
        Subsequents::new(self)
    }
}

impl Index<usize> for NdSequent {
    type Output = FormulaSet;

    fn index(&self, position: usize) -> &FormulaSet {
        &self.sets[position]
    }
}

pub(crate) fn fmt_sets(f: &mut fmt::Formatter<'_>, sets: &[FormulaSet]) -> fmt::Result {
    write!(f, "[ ")?;
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            write!(f, " | ")?;
        }
        for (j, formula) in set.iter().enumerate() {
            if j > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", formula)?;
        }
    }
    write!(f, " ]")
}

impl fmt::Display for NdSequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_sets(f, &self.sets)
    }
}

/// Lazy producer of the subsequents of a sequent.
///
/// The `K` formula occurrences are flattened into (position, formula) items;
/// every combination of `1..K` items is a subsequent. A sequent with `k_i`
/// formulas at position `i` yields `∏ 2^k_i - 2` of them.
#[derive(Debug, Clone)]
pub struct Subsequents {
    dimension: usize,
    items: Vec<(usize, Formula)>,
    size: usize,
    combinations: Combinations,
}

impl Subsequents {
    fn new(sequent: &NdSequent) -> Self {
        let items: Vec<(usize, Formula)> = sequent
            .sets
            .iter()
            .enumerate()
            .flat_map(|(position, set)| set.iter().map(move |f| (position, f.clone())))
            .collect();
        let n = items.len();
        Subsequents {
            dimension: sequent.dimension(),
            items,
            size: 1,
            combinations: Combinations::new(n, 1),
        }
    }
}

impl Iterator for Subsequents {
    type Item = NdSequent;

    fn next(&mut self) -> Option<NdSequent> {
        loop {
            if self.size >= self.items.len() {
                return None;
            }
            if let Some(chosen) = self.combinations.next() {
                let mut sequent = NdSequent::empty(self.dimension);
                for index in chosen {
                    let (position, formula) = &self.items[index];
                    sequent.sets[*position].insert(formula.clone());
                }
                return Some(sequent);
            }
            self.size += 1;
            self.combinations = Combinations::new(self.items.len(), self.size);
        }
    }
}
