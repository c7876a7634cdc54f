//! Property-based tests for rule-set simplification using proptest.

use super::{DimensionLayout, RuleSimplifier};
use crate::proof::{MultipleConclusionRule, NdSequent, RuleSet};
use crate::syntax::{Formula, FormulaSet};
use proptest::prelude::*;

/// Small atom pool so that random rules share formulas often
fn arb_set() -> impl Strategy<Value = FormulaSet> {
    proptest::collection::btree_set(0..5u8, 0..=3)
        .prop_map(|atoms| atoms.into_iter().map(|i| Formula::prop(format!("a{}", i))).collect())
}

fn arb_rule_over(layout: DimensionLayout) -> impl Strategy<Value = MultipleConclusionRule> {
    proptest::collection::vec(arb_set(), layout.ndsets()).prop_map(move |sets| {
        MultipleConclusionRule::new("r", NdSequent::new(sets), layout.correspondence())
            .unwrap_or_else(|e| panic!("layout positions: {}", e))
    })
}

fn arb_rules_over(layout: DimensionLayout) -> impl Strategy<Value = RuleSet> {
    proptest::collection::vec(arb_rule_over(layout), 0..8).prop_map(|rules| rules.into_iter().collect())
}

fn two() -> DimensionLayout {
    DimensionLayout::identity(2).unwrap_or_else(|e| panic!("{}", e))
}

fn four() -> DimensionLayout {
    DimensionLayout::identity(4).unwrap_or_else(|e| panic!("{}", e))
}

/// Two opposition pairs, placed out of order
fn four_permuted() -> DimensionLayout {
    DimensionLayout::new(vec![0, 3, 1, 2]).unwrap_or_else(|e| panic!("{}", e))
}

fn arb_rule() -> impl Strategy<Value = MultipleConclusionRule> {
    arb_rule_over(two())
}

fn arb_rules() -> impl Strategy<Value = RuleSet> {
    arb_rules_over(two())
}

fn simplifier() -> RuleSimplifier {
    RuleSimplifier::new(two())
}

proptest! {
    /// Removing dilutions twice is removing them once, and no survivor
    /// dilutes another
    #[test]
    fn dilution_removal_idempotent(rules in arb_rules()) {
        let s = simplifier();
        let once = s.remove_dilutions(&rules);
        prop_assert_eq!(&s.remove_dilutions(&once), &once);
        for a in &once {
            for b in &once {
                if a != b {
                    prop_assert!(!a.is_dilution_of(b));
                }
            }
        }
        // Every removed rule is a dilution of a survivor
        for rule in &rules {
            prop_assert!(once.iter().any(|kept| rule.is_dilution_of(kept)));
        }
    }

    /// No rule survives overlap removal with a formula on both sides
    #[test]
    fn overlap_removal_sound(rules in arb_rules()) {
        let s = simplifier();
        for rule in s.remove_overlaps(&rules) {
            prop_assert!(rule.sequent()[0].is_disjoint(&rule.sequent()[1]));
        }
    }

    /// A checked cut is a subrule of both premises
    #[test]
    fn cut_is_subrule_of_premises(r1 in arb_rule(), r2 in arb_rule()) {
        let s = simplifier();
        if let Some(cut) = s.simple_cut(&r1, &r2, true) {
            prop_assert!(r1.is_dilution_of(&cut));
            prop_assert!(r2.is_dilution_of(&cut));
        }
    }

    /// Cut saturation reaches a fixpoint
    #[test]
    fn cut_saturation_fixpoint(rules in arb_rules()) {
        let s = simplifier();
        let saturated = s.simplify_by_cut(&rules);
        prop_assert!(saturated.is_superset(&rules));
        prop_assert_eq!(&s.simplify_by_cut(&saturated), &saturated);
        prop_assert!(s.cuts_between_sets(&saturated, &saturated, true).is_subset(&saturated));
    }

    /// Opposed positions stay disjoint across every pair
    #[test]
    fn overlap_removal_sound_four_positions(rules in arb_rules_over(four())) {
        let s = RuleSimplifier::new(four());
        for rule in s.remove_overlaps(&rules) {
            for (d1, d2) in s.layout().pairs() {
                let (p1, p2) = (s.layout().position(d1), s.layout().position(d2));
                prop_assert!(rule.sequent()[p1].is_disjoint(&rule.sequent()[p2]));
            }
        }
    }

    /// A checked cut over two pairs is a subrule of both premises
    #[test]
    fn cut_is_subrule_four_positions(r1 in arb_rule_over(four()), r2 in arb_rule_over(four())) {
        for layout in [four(), four_permuted()] {
            let s = RuleSimplifier::new(layout);
            if let Some(cut) = s.simple_cut(&r1, &r2, true) {
                prop_assert!(r1.is_dilution_of(&cut));
                prop_assert!(r2.is_dilution_of(&cut));
                prop_assert_eq!(cut.correspondence(), r1.correspondence());
            }
        }
    }

    /// Saturation over two pairs reaches a fixpoint
    #[test]
    fn cut_saturation_fixpoint_four_positions(rules in arb_rules_over(four_permuted())) {
        let s = RuleSimplifier::new(four_permuted());
        let saturated = s.simplify_by_cut(&rules);
        prop_assert_eq!(&s.simplify_by_cut(&saturated), &saturated);
        let once = s.remove_dilutions(&saturated);
        prop_assert_eq!(&s.remove_dilutions(&once), &once);
    }
}
