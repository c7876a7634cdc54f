//! Derivation-based redundancy elimination
//!
//! A rule derivable from the rest of a calculus can be dropped. Dropping one
//! rule may make others underivable, so every removal order is explored up
//! to a depth bound and the longest chain of removals wins.

use crate::config::SearchConfig;
use crate::proof::{MultipleConclusionCalculus, MultipleConclusionRule};
use crate::syntax::FormulaSet;
use tracing::{debug, debug_span};

/// The most reduced calculus found and how it was reached
#[derive(Debug, Clone)]
pub struct ReductionOutcome {
    pub calculus: MultipleConclusionCalculus,
    /// Removed rules, in removal order
    pub removed: Vec<MultipleConclusionRule>,
    /// Depth reached by the removal chain
    pub depth: usize,
}

pub fn simplify_by_derivation(
    calculus: &MultipleConclusionCalculus,
    depth: usize,
    max_depth: usize,
    generating: &FormulaSet,
    config: &SearchConfig,
) -> ReductionOutcome {
    let _span = debug_span!("redundancy", depth, rules = calculus.len()).entered();
    let mut best = ReductionOutcome {
        calculus: calculus.clone(),
        removed: Vec::new(),
        depth,
    };
    if depth >= max_depth {
        return best;
    }
    for (index, rule) in calculus.iter().enumerate() {
        let reduced = calculus.without(index);
        if !reduced.derive(rule, generating, config).closed() {
            continue;
        }
        debug!(rule = %rule, depth, "rule derivable from the others");
        let mut outcome = simplify_by_derivation(&reduced, depth + 1, max_depth, generating, config);
        if outcome.depth > best.depth {
            outcome.removed.insert(0, rule.clone());
            best = outcome;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::NdSequent;
    use crate::syntax::{Connective, Formula};

    fn p(name: &str) -> Formula {
        Formula::prop(name)
    }

    fn conj() -> Formula {
        Formula::compound(&Connective::new("&", 2), vec![p("p1"), p("p2")]).unwrap()
    }

    fn rule(name: &str, premises: Vec<Formula>, conclusions: Vec<Formula>) -> MultipleConclusionRule {
        let sequent = NdSequent::new(vec![
            premises.into_iter().collect(),
            conclusions.into_iter().collect(),
        ]);
        MultipleConclusionRule::new(name, sequent, vec![(0, 1)]).unwrap()
    }

    #[test]
    fn test_derivable_rule_removed() {
        let calculus = MultipleConclusionCalculus::new(vec![
            rule("i", vec![p("p1"), p("p2")], vec![conj()]),
            rule("e1", vec![conj()], vec![p("p1")]),
            rule("e2", vec![conj()], vec![p("p2")]),
            // Follows from e1
            rule("w", vec![conj(), p("p2")], vec![p("p1")]),
        ]);
        let outcome = simplify_by_derivation(
            &calculus,
            0,
            3,
            &FormulaSet::from([p("p")]),
            &SearchConfig::default(),
        );
        // e1 and w derive each other (with e2), so only one of them goes.
        // Ties keep the first chain found.
        assert_eq!(outcome.depth, 1);
        assert_eq!(outcome.removed.len(), 1);
        assert_eq!(outcome.removed[0].name(), "e1");
        assert_eq!(outcome.calculus.len(), 3);
        assert!(outcome.calculus.iter().any(|r| r.name() == "w"));
    }

    #[test]
    fn test_depth_zero_keeps_everything() {
        let calculus = MultipleConclusionCalculus::new(vec![
            rule("e1", vec![conj()], vec![p("p1")]),
            rule("w", vec![conj(), p("p2")], vec![p("p1")]),
        ]);
        let outcome = simplify_by_derivation(
            &calculus,
            0,
            0,
            &FormulaSet::from([p("p")]),
            &SearchConfig::default(),
        );
        assert!(outcome.removed.is_empty());
        assert_eq!(outcome.calculus, calculus);
    }
}
