//! Multiple-conclusion calculi

use super::rule::{MultipleConclusionRule, RuleSet};
use super::search::{DerivationSearch, DerivationTree};
use crate::config::SearchConfig;
use crate::syntax::FormulaSet;
use std::collections::BTreeMap;
use std::fmt;

/// An ordered list of rules without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipleConclusionCalculus {
    rules: Vec<MultipleConclusionRule>,
}

impl MultipleConclusionCalculus {
    /// Keeps the first occurrence of each rule
    pub fn new(rules: impl IntoIterator<Item = MultipleConclusionRule>) -> Self {
        let mut kept: Vec<MultipleConclusionRule> = Vec::new();
        let mut seen = RuleSet::new();
        for rule in rules {
            if seen.insert(rule.clone()) {
                kept.push(rule);
            }
        }
        MultipleConclusionCalculus { rules: kept }
    }

    pub fn rules(&self) -> &[MultipleConclusionRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &MultipleConclusionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, rule: &MultipleConclusionRule) -> bool {
        self.rules.contains(rule)
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rules.iter().cloned().collect()
    }

    /// The calculus without the rule at `index`
    pub fn without(&self, index: usize) -> MultipleConclusionCalculus {
        MultipleConclusionCalculus {
            rules: self
                .rules
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, rule)| rule.clone())
                .collect(),
        }
    }

    /// Sub-calculi by group tag
    pub fn groups(&self) -> BTreeMap<String, MultipleConclusionCalculus> {
        let mut groups: BTreeMap<String, Vec<MultipleConclusionRule>> = BTreeMap::new();
        for rule in &self.rules {
            groups.entry(rule.group().to_string()).or_default().push(rule.clone());
        }
        groups
            .into_iter()
            .map(|(tag, rules)| (tag, MultipleConclusionCalculus { rules }))
            .collect()
    }

    /// Search for a derivation of `statement`, using formulas built from
    /// `generating` up to the configured analyticity level.
    pub fn derive(
        &self,
        statement: &MultipleConclusionRule,
        generating: &FormulaSet,
        config: &SearchConfig,
    ) -> DerivationTree {
        DerivationSearch::new(&self.rules, statement, generating, config)
            .run(statement.premises().to_vec())
    }
}

impl FromIterator<MultipleConclusionRule> for MultipleConclusionCalculus {
    fn from_iter<I: IntoIterator<Item = MultipleConclusionRule>>(iter: I) -> Self {
        MultipleConclusionCalculus::new(iter)
    }
}

impl fmt::Display for MultipleConclusionCalculus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
