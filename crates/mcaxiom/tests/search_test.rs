//! Integration tests for derivation search and redundancy elimination

mod common;

use common::*;
use mcaxiom::{
    simplify_by_derivation, Formula, InstanceOrder, MultipleConclusionCalculus,
    MultipleConclusionRule, NdSequent, SearchConfig,
};

fn rule(name: &str, premises: Vec<Formula>, conclusions: Vec<Formula>) -> MultipleConclusionRule {
    MultipleConclusionRule::new(name, NdSequent::new(vec![set(premises), set(conclusions)]), vec![(0, 1)])
        .unwrap()
}

/// Introduction and elimination for `&` and `~`, plus `|` introduction
fn natural_calculus() -> MultipleConclusionCalculus {
    let (p1, p2) = (p("p1"), p("p2"));
    MultipleConclusionCalculus::new(vec![
        rule("and-i", vec![p1.clone(), p2.clone()], vec![and(p1.clone(), p2.clone())]),
        rule("and-e1", vec![and(p1.clone(), p2.clone())], vec![p1.clone()]),
        rule("and-e2", vec![and(p1.clone(), p2.clone())], vec![p2.clone()]),
        rule("or-i1", vec![p1.clone()], vec![or(p1.clone(), p2.clone())]),
        rule("or-i2", vec![p2.clone()], vec![or(p1.clone(), p2.clone())]),
        rule("lem", vec![], vec![p1.clone(), neg(p1.clone())]),
        rule("contra", vec![p1.clone(), neg(p1)], vec![]),
    ])
}

fn generating() -> mcaxiom::FormulaSet {
    set(vec![p("p")])
}

#[test]
fn test_de_morgan() {
    init_tracing();
    let (a, b) = (p("a"), p("b"));
    let statement = rule(
        "de-morgan",
        vec![neg(and(a.clone(), b.clone()))],
        vec![or(neg(a), neg(b))],
    );
    let tree = natural_calculus().derive(&statement, &generating(), &SearchConfig::default());
    assert!(tree.closed());
    assert!(tree.root.height() > 2);
    assert!(tree.root.size() <= tree.stats.nodes_expanded);
    assert!(tree.to_string().contains("(axiom)"));
}

#[test]
fn test_order_does_not_change_derivability() {
    init_tracing();
    let calculus = natural_calculus();
    let (a, b) = (p("a"), p("b"));
    let statements = vec![
        rule("s1", vec![and(a.clone(), b.clone())], vec![and(b.clone(), a.clone())]),
        rule("s2", vec![neg(and(a.clone(), b.clone()))], vec![or(neg(a.clone()), neg(b.clone()))]),
        rule("s3", vec![a.clone()], vec![and(a.clone(), b.clone())]),
        rule("s4", vec![or(a.clone(), b.clone())], vec![a.clone(), b.clone()]),
    ];
    let fixed = SearchConfig::default();
    for seed in [1, 7, 42] {
        let shuffled = SearchConfig {
            instance_order: InstanceOrder::Shuffled { seed },
            ..SearchConfig::default()
        };
        for statement in &statements {
            assert_eq!(
                calculus.derive(statement, &generating(), &fixed).closed(),
                calculus.derive(statement, &generating(), &shuffled).closed(),
                "seed {} disagrees on {}",
                seed,
                statement
            );
        }
    }
    assert!(calculus.derive(&statements[0], &generating(), &fixed).closed());
    assert!(!calculus.derive(&statements[2], &generating(), &fixed).closed());
    // No disjunction elimination
    assert!(!calculus.derive(&statements[3], &generating(), &fixed).closed());
}

#[test]
fn test_depth_bound() {
    init_tracing();
    let calculus = natural_calculus();
    let (a, b) = (p("a"), p("b"));
    let statement = rule("s", vec![and(a.clone(), b.clone())], vec![and(b, a)]);
    let shallow = SearchConfig {
        max_depth: Some(1),
        ..SearchConfig::default()
    };
    let deep = SearchConfig {
        max_depth: Some(4),
        ..SearchConfig::default()
    };
    assert!(!calculus.derive(&statement, &generating(), &shallow).closed());
    assert!(calculus.derive(&statement, &generating(), &deep).closed());
}

#[test]
fn test_redundant_rule_removed() {
    init_tracing();
    let (p1, p2) = (p("p1"), p("p2"));
    let commute = rule("comm", vec![and(p1.clone(), p2.clone())], vec![and(p2.clone(), p1.clone())]);
    let calculus = MultipleConclusionCalculus::new(vec![
        rule("and-i", vec![p1.clone(), p2.clone()], vec![and(p1.clone(), p2.clone())]),
        rule("and-e1", vec![and(p1.clone(), p2.clone())], vec![p1.clone()]),
        rule("and-e2", vec![and(p1.clone(), p2.clone())], vec![p2.clone()]),
        commute.clone(),
    ]);
    let config = SearchConfig::default();
    let outcome = simplify_by_derivation(&calculus, 0, 3, &generating(), &config);

    assert_eq!(outcome.depth, 1);
    assert_eq!(outcome.removed.len(), 1);
    assert_eq!(outcome.calculus.len(), 3);
    for removed in &outcome.removed {
        assert!(outcome.calculus.derive(removed, &generating(), &config).closed());
    }
    assert!(outcome.calculus.derive(&commute, &generating(), &config).closed());
}
