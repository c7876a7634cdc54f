//! Rule-set simplification
//!
//! - Overlap removal drops rules whose opposed positions share a formula.
//! - Dilution removal keeps the ⊆-minimal rules.
//! - Cut saturation closes a set under [`RuleSimplifier::simple_cut`],
//!   semi-naively: each round only cuts the rules found in the previous one.
//! - Subrule minimization replaces a rule by its smallest derivable subrule.

use super::layout::DimensionLayout;
use crate::config::{SearchConfig, SimplifyOptions};
use crate::proof::{MultipleConclusionCalculus, MultipleConclusionRule, NdSequent, RuleSet};
use crate::syntax::FormulaSet;
use tracing::{debug, debug_span, trace};

#[derive(Debug, Clone)]
pub struct RuleSimplifier {
    layout: DimensionLayout,
}

impl RuleSimplifier {
    pub fn new(layout: DimensionLayout) -> Self {
        RuleSimplifier { layout }
    }

    pub fn layout(&self) -> &DimensionLayout {
        &self.layout
    }

    /// Whether some opposition pair has intersecting positions
    pub fn has_overlap(&self, rule: &MultipleConclusionRule) -> bool {
        let sequent = rule.sequent();
        self.layout.pairs().any(|(d1, d2)| {
            match (
                sequent.get(self.layout.position(d1)),
                sequent.get(self.layout.position(d2)),
            ) {
                (Some(s1), Some(s2)) => !s1.is_disjoint(s2),
                _ => false,
            }
        })
    }

    pub fn remove_overlaps(&self, rules: &RuleSet) -> RuleSet {
        let result: RuleSet = rules
            .iter()
            .filter(|rule| !self.has_overlap(rule))
            .cloned()
            .collect();
        trace!(before = rules.len(), after = result.len(), "overlaps removed");
        result
    }

    /// Drop every rule that is a dilution of another one.
    ///
    /// Rules are visited by increasing size, so a rule is compared only with
    /// the survivors that could be below it.
    pub fn remove_dilutions(&self, rules: &RuleSet) -> RuleSet {
        let mut ordered: Vec<&MultipleConclusionRule> = rules.iter().collect();
        ordered.sort_by_key(|rule| rule.total_size());
        let mut survivors: Vec<&MultipleConclusionRule> = Vec::new();
        for rule in ordered {
            if !survivors.iter().any(|kept| rule.is_dilution_of(kept)) {
                survivors.push(rule);
            }
        }
        trace!(before = rules.len(), after = survivors.len(), "dilutions removed");
        survivors.into_iter().cloned().collect()
    }

    /// Cut `r1` against `r2` on the smallest formula shared by `r1`'s side
    /// `d1` and `r2`'s side `d2` of the first opposition pair where one
    /// exists. Other pairs are joined pointwise.
    ///
    /// With `subrule_check`, the cut is kept only when both premises are
    /// dilutions of it.
    pub fn simple_cut(
        &self,
        r1: &MultipleConclusionRule,
        r2: &MultipleConclusionRule,
        subrule_check: bool,
    ) -> Option<MultipleConclusionRule> {
        let (s1, s2) = (r1.sequent(), r2.sequent());
        if s1.dimension() != s2.dimension() {
            return None;
        }
        for (d1, d2) in self.layout.pairs() {
            let (p1, p2) = (self.layout.position(d1), self.layout.position(d2));
            let Some(shared) = s1.get(p1)?.intersection(s2.get(p2)?).next().cloned() else {
                continue;
            };

            let mut sets = s1.clone().into_sets();
            let mut left: FormulaSet = s1[p1].clone();
            left.remove(&shared);
            left.extend(s2[p1].iter().cloned());
            let mut right: FormulaSet = s2[p2].clone();
            right.remove(&shared);
            right.extend(s1[p2].iter().cloned());
            sets[p1] = left;
            sets[p2] = right;
            for (o1, o2) in self.layout.pairs().filter(|&(o1, _)| o1 != d1) {
                for position in [self.layout.position(o1), self.layout.position(o2)] {
                    sets[position].extend(s2.get(position)?.iter().cloned());
                }
            }

            let cut = NdSequent::new(sets);
            if subrule_check && !(s1.is_dilution_of(&cut) && s2.is_dilution_of(&cut)) {
                return None;
            }
            return r1.with_sequent(cut).ok();
        }
        None
    }

    /// All cuts of a rule of `left` with a rule of `right`, both ways round
    pub fn cuts_between_sets(&self, left: &RuleSet, right: &RuleSet, subrule_check: bool) -> RuleSet {
        let mut result = RuleSet::new();
        for r1 in left {
            for r2 in right {
                if let Some(cut) = self.simple_cut(r1, r2, subrule_check) {
                    result.insert(cut);
                }
                if let Some(cut) = self.simple_cut(r2, r1, subrule_check) {
                    result.insert(cut);
                }
            }
        }
        result
    }

    /// Close `rules` under subrule-checked cuts
    pub fn simplify_by_cut(&self, rules: &RuleSet) -> RuleSet {
        let _span = debug_span!("cut_saturation", rules = rules.len()).entered();
        let mut current = rules.clone();
        let mut fresh: RuleSet = self
            .cuts_between_sets(&current, &current, true)
            .difference(&current)
            .cloned()
            .collect();
        let mut round = 0;
        while !fresh.is_empty() {
            round += 1;
            debug!(round, new = fresh.len(), total = current.len(), "cut round");
            current.extend(fresh.iter().cloned());
            fresh = self
                .cuts_between_sets(&current, &fresh, true)
                .difference(&current)
                .cloned()
                .collect();
        }
        current
    }

    /// Replace each rule by its smallest subrule derivable from the whole set
    pub fn simplify_by_subrule_deriv(
        &self,
        rules: &RuleSet,
        generating: &FormulaSet,
        config: &SearchConfig,
    ) -> RuleSet {
        let _span = debug_span!("subrule_derivation", rules = rules.len()).entered();
        let calculus = MultipleConclusionCalculus::new(rules.iter().cloned());
        let mut result = RuleSet::new();
        for rule in rules {
            let replacement = rule
                .sequent()
                .subsequents()
                .filter_map(|sub| rule.with_sequent(sub).ok())
                .find(|candidate| calculus.derive(candidate, generating, config).closed());
            match replacement {
                Some(subrule) => {
                    debug!(rule = %rule, subrule = %subrule, "rule replaced by subrule");
                    result.insert(subrule);
                }
                None => {
                    result.insert(rule.clone());
                }
            }
        }
        result
    }

    /// Overlap and dilution removal, then rounds of cut saturation each
    /// followed by dilution removal, then optional subrule minimization.
    pub fn simplify_rules(
        &self,
        rules: &RuleSet,
        generating: &FormulaSet,
        options: &SimplifyOptions,
    ) -> RuleSet {
        let mut current = rules.clone();
        if options.remove_overlaps {
            current = self.remove_overlaps(&current);
        }
        if options.remove_dilutions {
            current = self.remove_dilutions(&current);
        }
        for _ in 0..options.cut_rounds {
            current = self.simplify_by_cut(&current);
            current = self.remove_dilutions(&current);
        }
        if options.subrule_derivation {
            current = self.simplify_by_subrule_deriv(&current, generating, &options.search);
        }
        current
    }

    pub fn simplify_calculus(
        &self,
        calculus: &MultipleConclusionCalculus,
        generating: &FormulaSet,
        options: &SimplifyOptions,
    ) -> MultipleConclusionCalculus {
        let simplified = self.simplify_rules(&calculus.rule_set(), generating, options);
        debug!(before = calculus.len(), after = simplified.len(), "calculus simplified");
        MultipleConclusionCalculus::new(simplified)
    }
}
