//! Discriminators: the bridge from values to separating formulas
//!
//! For every value `v` a discriminator holds one formula set per distinguished
//! set slot. The formulas are templates over a single generic variable; put a
//! formula `φ` in place of that variable and the slot-`i` separators of `v`
//! hold exactly when `φ` takes value `v` along dimension `i`.

use super::genmatrix::GenMatrix;
use super::truth_table::{Value, ValueSet};
use crate::error::{Error, Result};
use crate::syntax::{Formula, FormulaSet};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    variable: String,
    nslots: usize,
    separators: BTreeMap<Value, Vec<FormulaSet>>,
}

impl Discriminator {
    /// Every value must carry the same number of slots
    pub fn new(
        variable: impl Into<String>,
        separators: BTreeMap<Value, Vec<FormulaSet>>,
    ) -> Result<Self> {
        let nslots = separators.values().next().map_or(0, Vec::len);
        if let Some((value, slots)) = separators.iter().find(|(_, s)| s.len() != nslots) {
            return Err(Error::DiscriminatorDomain(format!(
                "value {} has {} slots, expected {}",
                value,
                slots.len(),
                nslots
            )));
        }
        Ok(Discriminator {
            variable: variable.into(),
            nslots,
            separators,
        })
    }

    /// The generic variable the templates are written in
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn nslots(&self) -> usize {
        self.nslots
    }

    pub fn values(&self) -> ValueSet {
        self.separators.keys().copied().collect()
    }

    /// Per-slot separators of `value` (empty slots when the value is unknown)
    pub fn separators(&self, value: Value) -> Vec<FormulaSet> {
        self.separators
            .get(&value)
            .cloned()
            .unwrap_or_else(|| vec![FormulaSet::new(); self.nslots])
    }

    /// The slot-`slot` separators of `value`
    pub fn separator(&self, value: Value, slot: usize) -> Option<&FormulaSet> {
        self.separators.get(&value).and_then(|slots| slots.get(slot))
    }

    /// Instantiate the separators of `value` at `formula`
    pub fn apply_subs(&self, value: Value, formula: &Formula) -> Vec<FormulaSet> {
        match self.separators.get(&value) {
            Some(slots) => slots
                .iter()
                .map(|slot| {
                    slot.iter()
                        .map(|template| template.substitute(&self.variable, formula))
                        .collect()
                })
                .collect(),
            None => vec![FormulaSet::new(); self.nslots],
        }
    }

    /// All separator templates, the generating formulas for analytic search
    pub fn base_formulas(&self) -> FormulaSet {
        self.separators
            .values()
            .flatten()
            .flat_map(|slot| slot.iter().cloned())
            .collect()
    }

    /// Check the value domain and slot count against a matrix
    pub fn check_against(&self, matrix: &GenMatrix) -> Result<()> {
        if &self.values() != matrix.values() {
            return Err(Error::DiscriminatorDomain(format!(
                "covers values {:?}, matrix has {:?}",
                self.values(),
                matrix.values()
            )));
        }
        if self.nslots != matrix.distinguished_sets().len() {
            return Err(Error::DiscriminatorDomain(format!(
                "{} slots for {} distinguished sets",
                self.nslots,
                matrix.distinguished_sets().len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Connective;

    fn classical() -> Discriminator {
        let p = Formula::prop("p");
        let mut separators = BTreeMap::new();
        separators.insert(0, vec![FormulaSet::new(), FormulaSet::from([p.clone()])]);
        separators.insert(1, vec![FormulaSet::from([p]), FormulaSet::new()]);
        Discriminator::new("p", separators).unwrap()
    }

    #[test]
    fn test_apply_subs() {
        let disc = classical();
        let and = Connective::new("&", 2);
        let f = Formula::compound(&and, vec![Formula::prop("p1"), Formula::prop("p2")]).unwrap();
        let slots = disc.apply_subs(0, &f);
        assert!(slots[0].is_empty());
        assert_eq!(slots[1], FormulaSet::from([f.clone()]));
        assert_eq!(disc.apply_subs(1, &f)[0], FormulaSet::from([f]));
    }

    #[test]
    fn test_apply_subs_nested_template() {
        let neg = Connective::new("~", 1);
        let np = Formula::compound(&neg, vec![Formula::prop("p")]).unwrap();
        let mut separators = BTreeMap::new();
        separators.insert(0, vec![FormulaSet::from([np])]);
        let disc = Discriminator::new("p", separators).unwrap();
        let slots = disc.apply_subs(0, &Formula::prop("q"));
        assert_eq!(slots[0].iter().next().unwrap().to_string(), "~(q)");
    }

    #[test]
    fn test_slot_count_checked() {
        let mut separators = BTreeMap::new();
        separators.insert(0, vec![FormulaSet::new()]);
        separators.insert(1, vec![FormulaSet::new(), FormulaSet::new()]);
        assert!(matches!(
            Discriminator::new("p", separators),
            Err(Error::DiscriminatorDomain(_))
        ));
    }

    #[test]
    fn test_base_formulas() {
        let disc = classical();
        assert_eq!(disc.base_formulas(), FormulaSet::from([Formula::prop("p")]));
        assert_eq!(disc.separator(1, 0).map(|s| s.len()), Some(1));
        assert!(disc.separator(2, 0).is_none());
    }
}
