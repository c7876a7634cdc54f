//! Semantic validity of N-dimensional sequents
//!
//! A sequent is valid in a matrix when no legal valuation sends every formula
//! at every position into the value set attached to that position. Validity
//! is decided by a backtracking search that assigns values to the subformula
//! closure bottom-up, honouring non-deterministic rows and partial ones.

use super::genmatrix::GenMatrix;
use super::truth_table::{Value, ValueSet};
use crate::combinatorics::SubsetsBySize;
use crate::error::{Error, Result};
use crate::syntax::{Formula, FormulaKind, FormulaSet};
use std::collections::BTreeMap;
use tracing::trace;

/// Assignment of values to the subformulas of a sequent
pub type CounterExample = BTreeMap<Formula, Value>;

pub struct SequentValidator<'a> {
    matrix: &'a GenMatrix,
    position_sets: Vec<ValueSet>,
    total_subsets: Vec<ValueSet>,
}

impl<'a> SequentValidator<'a> {
    /// `position_sets[i]` is the set a valuation must hit at position `i`
    /// to refute a sequent.
    pub fn new(matrix: &'a GenMatrix, position_sets: Vec<ValueSet>) -> Result<Self> {
        if let Some(&value) = position_sets
            .iter()
            .flatten()
            .find(|&&v| v >= matrix.nvalues())
        {
            return Err(Error::ValueOutOfRange {
                value,
                nvalues: matrix.nvalues(),
            });
        }
        let total_subsets = SubsetsBySize::new(matrix.nvalues())
            .map(|s| s.into_iter().collect::<ValueSet>())
            .filter(|s| matrix.is_total_subset(s))
            .collect();
        Ok(SequentValidator {
            matrix,
            position_sets,
            total_subsets,
        })
    }

    pub fn is_valid(&self, sequent: &[FormulaSet]) -> Result<bool> {
        Ok(self.counter_example(sequent)?.is_none())
    }

    /// A refuting assignment, if the sequent is not valid
    pub fn counter_example(&self, sequent: &[FormulaSet]) -> Result<Option<CounterExample>> {
        if sequent.len() != self.position_sets.len() {
            return Err(Error::DimensionMismatch {
                expected: self.position_sets.len(),
                got: sequent.len(),
            });
        }

        // Allowed values per formula, from the positions it occurs at
        let mut allowed: BTreeMap<Formula, ValueSet> = BTreeMap::new();
        let mut closure = FormulaSet::new();
        for (position, formulas) in sequent.iter().enumerate() {
            for formula in formulas {
                formula.collect_subformulas(&mut closure);
                let entry = allowed
                    .entry(formula.clone())
                    .or_insert_with(|| self.matrix.values().clone());
                *entry = entry
                    .intersection(&self.position_sets[position])
                    .copied()
                    .collect();
            }
        }

        // Children strictly smaller than parents, so size order is bottom-up
        let mut order: Vec<Formula> = closure.into_iter().collect();
        order.sort_by_key(Formula::size);

        let mut assignment = CounterExample::new();
        if self.assign(&order, 0, &allowed, &mut assignment)? {
            trace!(size = order.len(), "sequent refuted");
            Ok(Some(assignment))
        } else {
            Ok(None)
        }
    }

    fn assign(
        &self,
        order: &[Formula],
        index: usize,
        allowed: &BTreeMap<Formula, ValueSet>,
        assignment: &mut CounterExample,
    ) -> Result<bool> {
        let Some(formula) = order.get(index) else {
            return Ok(self.extends_to_total(assignment));
        };
        let mut candidates = match formula.kind() {
            FormulaKind::Prop(_) => self.matrix.values().clone(),
            FormulaKind::Compound(connective, children) => {
                let table = self.matrix.interpretation(connective.symbol())?;
                let args: Vec<Value> = children
                    .iter()
                    .filter_map(|child| assignment.get(child).copied())
                    .collect();
                table.at(&args)?.clone()
            }
        };
        if let Some(restriction) = allowed.get(formula) {
            candidates.retain(|v| restriction.contains(v));
        }
        for value in candidates {
            assignment.insert(formula.clone(), value);
            if self.assign(order, index + 1, allowed, assignment)? {
                return Ok(true);
            }
        }
        assignment.remove(formula);
        Ok(false)
    }

    /// The values used must fit inside a total subset, or the partial
    /// valuation cannot be extended to the whole language.
    fn extends_to_total(&self, assignment: &CounterExample) -> bool {
        let used: ValueSet = assignment.values().copied().collect();
        self.total_subsets.iter().any(|total| used.is_subset(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::TruthTable;
    use crate::syntax::{Connective, Signature};

    fn matrix(tables: Vec<(Connective, TruthTable)>) -> GenMatrix {
        let signature: Signature = tables.iter().map(|(c, _)| c.clone()).collect();
        let interpretation = tables
            .into_iter()
            .map(|(c, t)| (c.symbol().to_string(), t))
            .collect();
        GenMatrix::new(
            2,
            vec![ValueSet::from([1]), ValueSet::from([0])],
            signature,
            interpretation,
        )
        .unwrap()
    }

    fn classical_and() -> (Connective, TruthTable) {
        (
            Connective::new("&", 2),
            TruthTable::deterministic(2, 2, vec![0, 0, 0, 1]).unwrap(),
        )
    }

    fn sets(matrix: &GenMatrix) -> Vec<ValueSet> {
        matrix.distinguished_sets().to_vec()
    }

    #[test]
    fn test_conjunction_rules_valid() {
        let m = matrix(vec![classical_and()]);
        let validator = SequentValidator::new(&m, sets(&m)).unwrap();
        let and = Connective::new("&", 2);
        let p1 = Formula::prop("p1");
        let p2 = Formula::prop("p2");
        let conj = Formula::compound(&and, vec![p1.clone(), p2.clone()]).unwrap();

        let intro = vec![FormulaSet::from([p1.clone(), p2.clone()]), FormulaSet::from([conj.clone()])];
        assert!(validator.is_valid(&intro).unwrap());
        let elim = vec![FormulaSet::from([conj.clone()]), FormulaSet::from([p1.clone()])];
        assert!(validator.is_valid(&elim).unwrap());

        let wrong = vec![FormulaSet::from([p1.clone()]), FormulaSet::from([conj.clone()])];
        let cex = validator.counter_example(&wrong).unwrap().unwrap();
        assert_eq!(cex[&p1], 1);
        assert_eq!(cex[&conj], 0);
        assert_eq!(cex[&p2], 0);
    }

    #[test]
    fn test_identity_valid_empty_invalid() {
        let m = matrix(vec![classical_and()]);
        let validator = SequentValidator::new(&m, sets(&m)).unwrap();
        let p = Formula::prop("p");
        let id = vec![FormulaSet::from([p.clone()]), FormulaSet::from([p])];
        assert!(validator.is_valid(&id).unwrap());
        assert!(!validator.is_valid(&[FormulaSet::new(), FormulaSet::new()]).unwrap());
    }

    #[test]
    fn test_non_deterministic_row() {
        let o = Connective::new("o", 1);
        let table = TruthTable::new(2, 1, vec![ValueSet::from([0, 1]), ValueSet::from([1])]).unwrap();
        let m = matrix(vec![(o.clone(), table)]);
        let validator = SequentValidator::new(&m, sets(&m)).unwrap();
        let p = Formula::prop("p");
        let op = Formula::compound(&o, vec![p.clone()]).unwrap();
        // p designated forces o(p) designated
        let forward = vec![FormulaSet::from([p.clone()]), FormulaSet::from([op.clone()])];
        assert!(validator.is_valid(&forward).unwrap());
        // o(p) designated does not force p designated
        let backward = vec![FormulaSet::from([op]), FormulaSet::from([p])];
        assert!(!validator.is_valid(&backward).unwrap());
    }

    #[test]
    fn test_partial_row_excludes_value() {
        let o = Connective::new("o", 1);
        let table = TruthTable::new(2, 1, vec![ValueSet::new(), ValueSet::from([1])]).unwrap();
        let m = matrix(vec![(o, table)]);
        let validator = SequentValidator::new(&m, sets(&m)).unwrap();
        // No valuation gives p the value 0, so p is always designated
        let p = Formula::prop("p1");
        assert!(validator
            .is_valid(&[FormulaSet::new(), FormulaSet::from([p])])
            .unwrap());
    }

    #[test]
    fn test_dimension_checked() {
        let m = matrix(vec![classical_and()]);
        let validator = SequentValidator::new(&m, sets(&m)).unwrap();
        assert!(matches!(
            validator.is_valid(&[FormulaSet::new()]),
            Err(Error::DimensionMismatch { expected: 2, got: 1 })
        ));
    }
}
