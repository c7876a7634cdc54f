//! Generalized matrices
//!
//! A generalized matrix has a finite value space `{0, ..., N-1}`, any number
//! of distinguished sets, and interprets each connective of its signature by a
//! (possibly non-deterministic, possibly partial) truth table.

use super::truth_table::{TruthTable, Value, ValueSet};
use crate::combinatorics::{cartesian_product, SubsetsBySize};
use crate::error::{Error, Result};
use crate::syntax::{Formula, FormulaKind, Signature};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct GenMatrix {
    nvalues: usize,
    values: ValueSet,
    distinguished_sets: Vec<ValueSet>,
    signature: Signature,
    interpretation: BTreeMap<String, TruthTable>,
}

impl GenMatrix {
    /// Build a matrix, checking that every table interprets a connective of
    /// the signature with the right arity over the right value space.
    pub fn new(
        nvalues: usize,
        distinguished_sets: Vec<ValueSet>,
        signature: Signature,
        interpretation: BTreeMap<String, TruthTable>,
    ) -> Result<Self> {
        for set in &distinguished_sets {
            if let Some(&value) = set.iter().find(|&&v| v >= nvalues) {
                return Err(Error::ValueOutOfRange { value, nvalues });
            }
        }
        for (symbol, table) in &interpretation {
            let connective = signature.get(symbol)?;
            if connective.arity() != table.arity() {
                return Err(Error::TableArityMismatch {
                    symbol: symbol.clone(),
                    table: table.arity(),
                    connective: connective.arity(),
                });
            }
            if table.nvalues() != nvalues {
                return Err(Error::TableSize {
                    expected: nvalues,
                    got: table.nvalues(),
                });
            }
        }
        Ok(GenMatrix {
            nvalues,
            values: (0..nvalues).collect(),
            distinguished_sets,
            signature,
            interpretation,
        })
    }

    pub fn nvalues(&self) -> usize {
        self.nvalues
    }

    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    pub fn distinguished_sets(&self) -> &[ValueSet] {
        &self.distinguished_sets
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Truth table of a connective
    pub fn interpretation(&self, symbol: &str) -> Result<&TruthTable> {
        self.signature.get(symbol)?;
        self.interpretation
            .get(symbol)
            .ok_or_else(|| Error::MissingInterpretation(symbol.to_string()))
    }

    /// Interpreted connectives and their tables, ordered by symbol
    pub fn tables(&self) -> impl Iterator<Item = (&str, &TruthTable)> {
        self.interpretation.iter().map(|(s, t)| (s.as_str(), t))
    }

    /// The values outside of `set`
    pub fn complement(&self, set: &ValueSet) -> ValueSet {
        self.values.difference(set).copied().collect()
    }

    /// Possible values of `formula` under `valuation`. Non-determinism makes
    /// this a set; an empty set means the formula has no legal value.
    pub fn evaluate(&self, formula: &Formula, valuation: &Valuation) -> Result<ValueSet> {
        match formula.kind() {
            FormulaKind::Prop(name) => Ok(valuation.get(name).into_iter().collect()),
            FormulaKind::Compound(connective, children) => {
                let table = self.interpretation(connective.symbol())?;
                let mut args = Vec::with_capacity(children.len());
                for child in children {
                    args.push(self.evaluate(child, valuation)?.into_iter().collect::<Vec<_>>());
                }
                let mut result = ValueSet::new();
                for input in cartesian_product(&args) {
                    result.extend(table.at(&input)?.iter().copied());
                }
                Ok(result)
            }
        }
    }

    /// Whether every row with all inputs in `subset` can output inside it
    pub fn is_total_subset(&self, subset: &ValueSet) -> bool {
        self.interpretation.values().all(|table| {
            table.determinants().all(|row| {
                !row.args().iter().all(|a| subset.contains(a))
                    || row.output().iter().any(|v| subset.contains(v))
            })
        })
    }

    /// Inclusion-minimal value sets not contained in any total subset. No
    /// valuation can realise all the values of such a set at once.
    pub fn non_total_subsets(&self) -> Vec<ValueSet> {
        let subsets: Vec<ValueSet> = SubsetsBySize::new(self.nvalues)
            .map(|s| s.into_iter().collect())
            .collect();
        let total: Vec<&ValueSet> = subsets.iter().filter(|s| self.is_total_subset(s)).collect();
        let mut minimal: Vec<ValueSet> = Vec::new();
        // By increasing size, so any smaller excluded set is seen first
        for subset in &subsets {
            let excluded = !total.iter().any(|t| subset.is_subset(t));
            if excluded && !minimal.iter().any(|m| m.is_subset(subset)) {
                minimal.push(subset.clone());
            }
        }
        minimal
    }

    /// Lazily enumerate every assignment of values to `props`
    pub fn valuations(&self, props: Vec<String>) -> Result<ValuationIter> {
        ValuationIter::new(self.nvalues, props)
    }
}

/// An assignment of truth values to propositional variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Valuation {
    map: BTreeMap<String, Value>,
}

impl Valuation {
    /// Build a valuation, rejecting values outside `[0, nvalues)`
    pub fn new(nvalues: usize, mappings: impl IntoIterator<Item = (String, Value)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (prop, value) in mappings {
            if value >= nvalues {
                return Err(Error::ValueOutOfRange { value, nvalues });
            }
            map.insert(prop, value);
        }
        Ok(Valuation { map })
    }

    pub fn get(&self, prop: &str) -> Option<Value> {
        self.map.get(prop).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.map.iter().map(|(p, v)| (p.as_str(), *v))
    }
}

/// Iterator over all `N^k` valuations of `k` variables
#[derive(Debug, Clone)]
pub struct ValuationIter {
    nvalues: usize,
    props: Vec<String>,
    next_position: usize,
    total: usize,
}

impl ValuationIter {
    fn new(nvalues: usize, props: Vec<String>) -> Result<Self> {
        let total = crate::combinatorics::number_of_rows(nvalues, props.len())?;
        Ok(ValuationIter {
            nvalues,
            props,
            next_position: 0,
            total,
        })
    }
}

impl Iterator for ValuationIter {
    type Item = Valuation;

    fn next(&mut self) -> Option<Valuation> {
        if self.next_position >= self.total {
            return None;
        }
        let images =
            crate::combinatorics::tuple_from_position(self.nvalues, self.props.len(), self.next_position)
                .ok()?;
        self.next_position += 1;
        Some(Valuation {
            map: self.props.iter().cloned().zip(images).collect(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next_position;
        (remaining, Some(remaining))
    }
}
