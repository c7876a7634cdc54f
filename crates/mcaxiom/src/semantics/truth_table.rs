//! Non-deterministic, possibly partial truth tables

use crate::combinatorics::{number_of_rows, position_from_tuple, tuple_from_position};
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// A truth value, an integer in `[0, N)`
pub type Value = usize;

/// A set of truth values
pub type ValueSet = BTreeSet<Value>;

/// One row of a truth table: the input tuple (stored as its lexicographic
/// position) and the set of allowed outputs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Determinant {
    nvalues: usize,
    arity: usize,
    position: usize,
    output: ValueSet,
}

impl Determinant {
    pub fn new(nvalues: usize, args: &[Value], output: ValueSet) -> Result<Self> {
        if let Some(&value) = args.iter().chain(output.iter()).find(|&&v| v >= nvalues) {
            return Err(Error::ValueOutOfRange { value, nvalues });
        }
        Ok(Determinant {
            nvalues,
            arity: args.len(),
            position: position_from_tuple(nvalues, args)?,
            output,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The decoded input tuple
    pub fn args(&self) -> Vec<Value> {
        // position < nvalues^arity holds by construction
        tuple_from_position(self.nvalues, self.arity, self.position).unwrap_or_default()
    }

    /// The allowed outputs (empty = impossible row)
    pub fn output(&self) -> &ValueSet {
        &self.output
    }

    /// Whether exactly one output is allowed
    pub fn is_deterministic(&self) -> bool {
        self.output.len() == 1
    }
}

impl fmt::Display for Determinant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, arg) in self.args().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ") -> {{")?;
        for (i, v) in self.output.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

/// An `nvalues`-valued, `arity`-ary truth table storing one output set per
/// input tuple, indexed by the tuple's lexicographic position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    nvalues: usize,
    arity: usize,
    images: Vec<ValueSet>,
}

impl TruthTable {
    /// Build a table from its images, one per row in lexicographic order
    pub fn new(nvalues: usize, arity: usize, images: Vec<ValueSet>) -> Result<Self> {
        let expected = number_of_rows(nvalues, arity)?;
        if images.len() != expected {
            return Err(Error::TableSize {
                expected,
                got: images.len(),
            });
        }
        if let Some(&value) = images.iter().flatten().find(|&&v| v >= nvalues) {
            return Err(Error::ValueOutOfRange { value, nvalues });
        }
        Ok(TruthTable {
            nvalues,
            arity,
            images,
        })
    }

    /// Build a deterministic table from single outputs
    pub fn deterministic(nvalues: usize, arity: usize, images: Vec<Value>) -> Result<Self> {
        TruthTable::new(
            nvalues,
            arity,
            images.into_iter().map(|v| ValueSet::from([v])).collect(),
        )
    }

    /// Every row allows every value
    pub fn fully_nd(nvalues: usize, arity: usize) -> Result<Self> {
        let all: ValueSet = (0..nvalues).collect();
        Ok(TruthTable {
            nvalues,
            arity,
            images: vec![all; number_of_rows(nvalues, arity)?],
        })
    }

    /// Every row is impossible
    pub fn fully_partial(nvalues: usize, arity: usize) -> Result<Self> {
        Ok(TruthTable {
            nvalues,
            arity,
            images: vec![ValueSet::new(); number_of_rows(nvalues, arity)?],
        })
    }

    /// Overwrite the row for `determinant`'s input
    pub fn set(&mut self, determinant: &Determinant) -> Result<()> {
        if determinant.arity != self.arity {
            return Err(Error::DimensionMismatch {
                expected: self.arity,
                got: determinant.arity,
            });
        }
        if determinant.nvalues != self.nvalues {
            return Err(Error::ValueCountMismatch {
                expected: self.nvalues,
                got: determinant.nvalues,
            });
        }
        self.images[determinant.position] = determinant.output.clone();
        Ok(())
    }

    pub fn nvalues(&self) -> usize {
        self.nvalues
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Output set for the row at `position`
    pub fn at_position(&self, position: usize) -> Option<&ValueSet> {
        self.images.get(position)
    }

    /// Output set for the given input tuple
    pub fn at(&self, args: &[Value]) -> Result<&ValueSet> {
        if args.len() != self.arity {
            return Err(Error::DimensionMismatch {
                expected: self.arity,
                got: args.len(),
            });
        }
        if let Some(&value) = args.iter().find(|&&v| v >= self.nvalues) {
            return Err(Error::ValueOutOfRange {
                value,
                nvalues: self.nvalues,
            });
        }
        Ok(&self.images[position_from_tuple(self.nvalues, args)?])
    }

    /// All rows, in lexicographic order of their inputs
    pub fn determinants(&self) -> impl Iterator<Item = Determinant> + '_ {
        self.images
            .iter()
            .enumerate()
            .map(move |(position, output)| Determinant {
                nvalues: self.nvalues,
                arity: self.arity,
                position,
                output: output.clone(),
            })
    }

    /// Every row has exactly one output
    pub fn is_deterministic(&self) -> bool {
        self.images.iter().all(|image| image.len() == 1)
    }

    /// Some row has no output
    pub fn is_partial(&self) -> bool {
        self.images.iter().any(ValueSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_table() -> TruthTable {
        TruthTable::deterministic(2, 2, vec![0, 0, 0, 1]).unwrap()
    }

    #[test]
    fn test_at() {
        let table = and_table();
        assert_eq!(table.at(&[1, 1]).unwrap(), &ValueSet::from([1]));
        assert_eq!(table.at(&[1, 0]).unwrap(), &ValueSet::from([0]));
        assert!(table.at(&[1]).is_err());
        assert!(matches!(
            table.at(&[2, 0]),
            Err(Error::ValueOutOfRange { value: 2, .. })
        ));
    }

    #[test]
    fn test_wrong_size_rejected() {
        let err = TruthTable::deterministic(2, 2, vec![0, 0, 1]).unwrap_err();
        assert_eq!(err, Error::TableSize { expected: 4, got: 3 });
        let err = TruthTable::deterministic(2, 1, vec![0, 2]).unwrap_err();
        assert_eq!(err, Error::ValueOutOfRange { value: 2, nvalues: 2 });
    }

    #[test]
    fn test_determinants() {
        let table = and_table();
        let rows: Vec<Determinant> = table.determinants().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].args(), vec![1, 0]);
        assert_eq!(rows[3].output(), &ValueSet::from([1]));
        assert_eq!(rows[3].to_string(), "(1,1) -> {1}");
        assert!(table.is_deterministic());
        assert!(!table.is_partial());
    }

    #[test]
    fn test_constant_table() {
        let top = TruthTable::deterministic(2, 0, vec![1]).unwrap();
        let rows: Vec<Determinant> = top.determinants().collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].args().is_empty());
    }

    #[test]
    fn test_fully_nd_and_partial() {
        let nd = TruthTable::fully_nd(3, 1).unwrap();
        assert!(nd.determinants().all(|d| d.output().len() == 3));
        let mut partial = TruthTable::fully_partial(3, 1).unwrap();
        assert!(partial.is_partial());
        let row = Determinant::new(3, &[2], ValueSet::from([0, 1])).unwrap();
        partial.set(&row).unwrap();
        assert_eq!(partial.at(&[2]).unwrap(), &ValueSet::from([0, 1]));
        assert!(partial.at(&[0]).unwrap().is_empty());
    }

    #[test]
    fn test_set_rejects_foreign_row() {
        let mut table = and_table();
        let wide = Determinant::new(2, &[1], ValueSet::from([0])).unwrap();
        assert_eq!(
            table.set(&wide),
            Err(Error::DimensionMismatch { expected: 2, got: 1 })
        );
        let three_valued = Determinant::new(3, &[1, 1], ValueSet::from([0])).unwrap();
        assert_eq!(
            table.set(&three_valued),
            Err(Error::ValueCountMismatch { expected: 2, got: 3 })
        );
    }

    #[test]
    fn test_oversized_table_rejected() {
        assert_eq!(
            TruthTable::new(2, 64, Vec::new()).unwrap_err(),
            Error::TableTooLarge { nvalues: 2, arity: 64 }
        );
        assert!(TruthTable::fully_nd(2, 64).is_err());
        assert!(Determinant::new(2, &[1; 64], ValueSet::new()).is_err());
    }
}
