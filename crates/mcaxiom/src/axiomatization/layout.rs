//! Placement of distinguished sets in rule sequents
//!
//! Distinguished sets come in opposition pairs `(2i, 2i+1)`, one pair per
//! logical dimension `i`. Each set is placed at a physical sequent position.

use crate::error::{Error, Result};
use crate::syntax::FormulaSet;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionLayout {
    positions: Vec<usize>,
}

impl DimensionLayout {
    /// `positions[d]` is the sequent position of distinguished set `d`
    pub fn new(positions: Vec<usize>) -> Result<Self> {
        let count = positions.len();
        if count % 2 != 0 {
            return Err(Error::OddDistinguishedSets(count));
        }
        let mut seen = BTreeSet::new();
        for &position in &positions {
            if position >= count || !seen.insert(position) {
                return Err(Error::PositionOutOfRange {
                    position,
                    dimension: count,
                });
            }
        }
        Ok(DimensionLayout { positions })
    }

    /// Set `d` at position `d`
    pub fn identity(ndsets: usize) -> Result<Self> {
        DimensionLayout::new((0..ndsets).collect())
    }

    pub fn ndsets(&self) -> usize {
        self.positions.len()
    }

    pub fn ndimensions(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn position(&self, dset: usize) -> usize {
        self.positions[dset]
    }

    pub fn dimension_of(&self, dset: usize) -> usize {
        dset / 2
    }

    pub fn opposite(&self, dset: usize) -> usize {
        dset ^ 1
    }

    /// Opposition pairs of distinguished set indices
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.ndimensions()).map(|i| (2 * i, 2 * i + 1))
    }

    /// Premise/conclusion positions, one pair per dimension
    pub fn correspondence(&self) -> Vec<(usize, usize)> {
        self.pairs()
            .map(|(d1, d2)| (self.positions[d1], self.positions[d2]))
            .collect()
    }

    /// An empty sequent body of the right size
    pub fn empty_sets(&self) -> Vec<FormulaSet> {
        vec![FormulaSet::new(); self.positions.len()]
    }
}
