//! Rule generation from a matrix and its discriminator
//!
//! Four families of rules, each tagged with its group:
//!
//! - `exists`: every value set `X` and its complement, with one separator
//!   chosen per value, say that a formula takes some value.
//! - `d`: for each value, its separators together with the generic variable
//!   on the side opposite to the distinguished sets holding the value.
//! - `sigma-<symbol>`: for each row of a connective's table and each value
//!   the row forbids, a rule excluding that output.
//! - `nontotal`: for each minimal excluded value set, a rule saying those
//!   values are never realised together.

use super::layout::DimensionLayout;
use super::redundancy::simplify_by_derivation;
use super::simplify::RuleSimplifier;
use crate::combinatorics::SubsetsBySize;
use crate::config::{AxiomatizerConfig, SimplifyOptions};
use crate::error::{Error, Result};
use crate::proof::{MultipleConclusionCalculus, MultipleConclusionRule, NdSequent, RuleSet};
use crate::semantics::{Discriminator, GenMatrix, SequentValidator, TruthTable, Value, ValueSet};
use crate::syntax::{numbered_props, Formula, FormulaSet};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, info_span};

pub struct Axiomatizer<'a> {
    discriminator: &'a Discriminator,
    matrix: &'a GenMatrix,
    layout: DimensionLayout,
    simplifier: RuleSimplifier,
    config: AxiomatizerConfig,
}

impl<'a> Axiomatizer<'a> {
    /// `positions[d]` is the sequent position of distinguished set `d`.
    ///
    /// Fails when the distinguished sets do not come in pairs, when the
    /// positions do not match them, or when the discriminator disagrees with
    /// the matrix on values or slots.
    pub fn new(
        discriminator: &'a Discriminator,
        matrix: &'a GenMatrix,
        positions: Vec<usize>,
        config: AxiomatizerConfig,
    ) -> Result<Self> {
        let ndsets = matrix.distinguished_sets().len();
        if ndsets % 2 != 0 {
            return Err(Error::OddDistinguishedSets(ndsets));
        }
        if positions.len() != ndsets {
            return Err(Error::DimensionMismatch {
                expected: ndsets,
                got: positions.len(),
            });
        }
        discriminator.check_against(matrix)?;
        let layout = DimensionLayout::new(positions)?;
        Ok(Axiomatizer {
            discriminator,
            matrix,
            simplifier: RuleSimplifier::new(layout.clone()),
            layout,
            config,
        })
    }

    /// Distinguished set `d` at position `d`
    pub fn with_identity_layout(
        discriminator: &'a Discriminator,
        matrix: &'a GenMatrix,
        config: AxiomatizerConfig,
    ) -> Result<Self> {
        let positions = (0..matrix.distinguished_sets().len()).collect();
        Axiomatizer::new(discriminator, matrix, positions, config)
    }

    pub fn layout(&self) -> &DimensionLayout {
        &self.layout
    }

    pub fn simplifier(&self) -> &RuleSimplifier {
        &self.simplifier
    }

    pub fn config(&self) -> &AxiomatizerConfig {
        &self.config
    }

    /// Generating formulas for derivability checks
    pub fn generating_formulas(&self) -> FormulaSet {
        self.discriminator.base_formulas()
    }

    /// Validator refuting a sequent when each position's formulas land in
    /// the distinguished set placed there
    pub fn validator(&self) -> Result<SequentValidator<'a>> {
        let mut position_sets = vec![ValueSet::new(); self.layout.ndsets()];
        for (dset, set) in self.matrix.distinguished_sets().iter().enumerate() {
            position_sets[self.layout.position(dset)] = set.clone();
        }
        SequentValidator::new(self.matrix, position_sets)
    }

    fn rule(&self, name: String, sets: Vec<FormulaSet>) -> Result<MultipleConclusionRule> {
        MultipleConclusionRule::new(name, NdSequent::new(sets), self.layout.correspondence())
    }

    /// Every way of picking, for each value of `values`, one separator from
    /// one of the slots `dsets`, collected per dimension. A value without
    /// separators in those slots makes the choice infeasible. The empty value
    /// set has exactly one choice, all empty.
    pub fn make_separator_choice(&self, values: &ValueSet, dsets: &[usize]) -> Vec<Vec<FormulaSet>> {
        let mut choices: BTreeSet<Vec<FormulaSet>> = BTreeSet::new();
        choices.insert(vec![FormulaSet::new(); self.layout.ndimensions()]);
        for &value in values {
            let options: Vec<(usize, &Formula)> = dsets
                .iter()
                .filter_map(|&d| {
                    self.discriminator
                        .separator(value, d)
                        .map(|set| (self.layout.dimension_of(d), set))
                })
                .flat_map(|(dimension, set)| set.iter().map(move |f| (dimension, f)))
                .collect();
            if options.is_empty() {
                return Vec::new();
            }
            let mut extended = BTreeSet::new();
            for choice in &choices {
                for &(dimension, formula) in &options {
                    let mut next = choice.clone();
                    next[dimension].insert(formula.clone());
                    extended.insert(next);
                }
            }
            choices = extended;
        }
        choices.into_iter().collect()
    }

    pub fn make_exists_rules(&self) -> Result<RuleSet> {
        let values = self.matrix.values();
        let (firsts, seconds): (Vec<usize>, Vec<usize>) = self.layout.pairs().unzip();
        let mut result = RuleSet::new();
        for subset in SubsetsBySize::new(values.len()) {
            let x: ValueSet = subset.into_iter().collect();
            let nx = self.matrix.complement(&x);
            let choices1 = self.make_separator_choice(&x, &firsts);
            let choices2 = self.make_separator_choice(&nx, &seconds);
            let digits: String = x.iter().map(|v| v.to_string()).collect();
            let mut index = 1;
            for seps1 in &choices1 {
                for seps2 in &choices2 {
                    let mut sets = self.layout.empty_sets();
                    for &d in &firsts {
                        sets[self.layout.position(d)] = seps1[self.layout.dimension_of(d)].clone();
                    }
                    for &d in &seconds {
                        sets[self.layout.position(d)] = seps2[self.layout.dimension_of(d)].clone();
                    }
                    result.insert(self.rule(format!("E-{}|{}", digits, index), sets)?);
                    index += 1;
                }
            }
        }
        debug!(rules = result.len(), "exists rules");
        Ok(result)
    }

    pub fn make_d_rules(&self) -> Result<RuleSet> {
        let dsets = self.matrix.distinguished_sets();
        let marker = Formula::prop(self.discriminator.variable());
        let mut result = RuleSet::new();
        for &value in self.matrix.values() {
            let mut base = self.layout.empty_sets();
            for (d, slot) in self.discriminator.separators(value).into_iter().enumerate() {
                base[self.layout.position(d)] = slot;
            }
            for (d1, d2) in self.layout.pairs() {
                let mut sets = base.clone();
                if dsets[d2].contains(&value) {
                    sets[self.layout.position(d1)].insert(marker.clone());
                }
                if dsets[d1].contains(&value) {
                    sets[self.layout.position(d2)].insert(marker.clone());
                }
                result.insert(self.rule(format!("D-{}", value), sets)?);
            }
        }
        debug!(rules = result.len(), "d rules");
        Ok(result)
    }

    /// Separators of each argument value, instantiated at `p1..pk`
    fn argument_separators(&self, args: &[Value], props: &[Formula]) -> Vec<FormulaSet> {
        let mut sets = self.layout.empty_sets();
        for (arg, prop) in args.iter().zip(props) {
            for (d, slot) in self.discriminator.apply_subs(*arg, prop).into_iter().enumerate() {
                sets[self.layout.position(d)].extend(slot);
            }
        }
        sets
    }

    /// One rule per row and per output the row forbids
    pub fn make_sigma_rules_for(&self, symbol: &str, table: &TruthTable) -> Result<RuleSet> {
        let connective = self.matrix.signature().get(symbol)?;
        let props = numbered_props(connective.arity());
        let compound = Formula::compound(connective, props.clone())?;
        let mut result = RuleSet::new();
        for determinant in table.determinants() {
            let args = determinant.args();
            let prefix: String = args.iter().map(|a| format!("{},", a)).collect();
            for y in self.matrix.complement(determinant.output()) {
                let mut sets = self.argument_separators(&args, &props);
                for (d, slot) in self.discriminator.apply_subs(y, &compound).into_iter().enumerate() {
                    sets[self.layout.position(d)].extend(slot);
                }
                result.insert(self.rule(format!("{}-{}{}", symbol, prefix, y), sets)?);
            }
        }
        Ok(result)
    }

    /// Deterministic rows only: one rule per separator of the output,
    /// asserting it on the opposite side of its slot.
    pub fn make_sigma_deterministic_rules_for(&self, symbol: &str, table: &TruthTable) -> Result<RuleSet> {
        let connective = self.matrix.signature().get(symbol)?;
        let props = numbered_props(connective.arity());
        let compound = Formula::compound(connective, props.clone())?;
        let mut result = RuleSet::new();
        for determinant in table.determinants().filter(|d| d.is_deterministic()) {
            let args = determinant.args();
            let prefix: String = args.iter().map(|a| format!("{},", a)).collect();
            let base = self.argument_separators(&args, &props);
            for &y in determinant.output() {
                let mut index = 1;
                for (d, slot) in self.discriminator.apply_subs(y, &compound).into_iter().enumerate() {
                    for separator in slot {
                        let mut sets = base.clone();
                        sets[self.layout.position(self.layout.opposite(d))].insert(separator);
                        let name = format!("{}-{}{}|{}", symbol, prefix, y, index);
                        result.insert(self.rule(name, sets)?);
                        index += 1;
                    }
                }
            }
        }
        Ok(result)
    }

    /// Sigma rules per connective symbol
    pub fn make_sigma_rules(&self) -> Result<BTreeMap<String, RuleSet>> {
        let mut result = BTreeMap::new();
        for (symbol, table) in self.matrix.tables() {
            let rules = if self.config.deterministic_sigma {
                self.make_sigma_deterministic_rules_for(symbol, table)?
            } else {
                self.make_sigma_rules_for(symbol, table)?
            };
            debug!(symbol, rules = rules.len(), "sigma rules");
            result.insert(symbol.to_string(), rules);
        }
        Ok(result)
    }

    pub fn make_nontotal_rules(&self) -> Result<RuleSet> {
        let props = numbered_props(self.matrix.nvalues());
        let mut result = RuleSet::new();
        for x in self.matrix.non_total_subsets() {
            let mut sets = self.layout.empty_sets();
            for &value in &x {
                for (d, slot) in self.discriminator.apply_subs(value, &props[value]).into_iter().enumerate() {
                    sets[self.layout.position(d)].extend(slot);
                }
            }
            let digits: String = x.iter().map(|v| v.to_string()).collect();
            result.insert(self.rule(format!("N-{}", digits), sets)?);
        }
        debug!(rules = result.len(), "non-totality rules");
        Ok(result)
    }

    fn family_options(&self, cut_rounds: usize) -> SimplifyOptions {
        SimplifyOptions {
            cut_rounds,
            subrule_derivation: false,
            ..self.config.simplify_options()
        }
    }

    fn tagged(rules: RuleSet, group: &str) -> MultipleConclusionCalculus {
        rules.into_iter().map(|rule| rule.with_group(group)).collect()
    }

    /// The four families, each simplified on its own, by group tag
    pub fn make_calculus(&self) -> Result<BTreeMap<String, MultipleConclusionCalculus>> {
        let _span = info_span!("make_calculus").entered();
        let generating = self.generating_formulas();
        let simplifier = &self.simplifier;
        let mut result = BTreeMap::new();

        let plain = self.family_options(0);
        let exists = simplifier.simplify_rules(&self.make_exists_rules()?, &generating, &plain);
        result.insert("exists".to_string(), Self::tagged(exists, "exists"));
        let d = simplifier.simplify_rules(&self.make_d_rules()?, &generating, &plain);
        result.insert("d".to_string(), Self::tagged(d, "d"));

        let cut_once = self.family_options(1);
        for (symbol, rules) in self.make_sigma_rules()? {
            let simplified = simplifier.simplify_rules(&rules, &generating, &cut_once);
            let group = format!("sigma-{}", symbol);
            result.insert(group.clone(), Self::tagged(simplified, &group));
        }

        let nontotal = simplifier.remove_dilutions(&simplifier.simplify_by_cut(&self.make_nontotal_rules()?));
        result.insert("nontotal".to_string(), Self::tagged(nontotal, "nontotal"));

        for (group, calculus) in &result {
            debug!(group = group.as_str(), rules = calculus.len(), "group ready");
        }
        Ok(result)
    }

    /// All groups in one calculus, optionally minimized, with rules renamed
    /// `r1, r2, ...`
    pub fn make_single_calculus(&self) -> Result<MultipleConclusionCalculus> {
        let groups = self.make_calculus()?;
        let _span = info_span!("make_single_calculus").entered();
        let generating = self.generating_formulas();
        let mut rules: RuleSet = RuleSet::new();
        for calculus in groups.values() {
            rules.extend(calculus.iter().cloned());
        }
        if self.config.subrule_derivation {
            rules = self
                .simplifier
                .simplify_by_subrule_deriv(&rules, &generating, &self.config.search);
        }
        let mut calculus = MultipleConclusionCalculus::new(rules);
        if let Some(max_depth) = self.config.derivation_max_depth {
            let outcome = simplify_by_derivation(&calculus, 0, max_depth, &generating, &self.config.search);
            debug!(removed = outcome.removed.len(), depth = outcome.depth, "redundant rules removed");
            calculus = outcome.calculus;
        }
        let renamed: MultipleConclusionCalculus = calculus
            .iter()
            .enumerate()
            .map(|(i, rule)| rule.clone().with_name(format!("r{}", i + 1)))
            .collect();
        info!(rules = renamed.len(), "calculus ready");
        Ok(renamed)
    }
}
