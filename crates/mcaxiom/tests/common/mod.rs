//! Shared fixtures for the integration tests

#![allow(dead_code)]

use mcaxiom::{Connective, Discriminator, Formula, FormulaSet, GenMatrix, Signature, TruthTable, ValueSet};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn p(name: &str) -> Formula {
    Formula::prop(name)
}

pub fn and(a: Formula, b: Formula) -> Formula {
    Formula::compound(&Connective::new("&", 2), vec![a, b]).unwrap()
}

pub fn or(a: Formula, b: Formula) -> Formula {
    Formula::compound(&Connective::new("|", 2), vec![a, b]).unwrap()
}

pub fn neg(a: Formula) -> Formula {
    Formula::compound(&Connective::new("~", 1), vec![a]).unwrap()
}

pub fn set(formulas: Vec<Formula>) -> FormulaSet {
    formulas.into_iter().collect()
}

/// `{0: ({}, {p}), 1: ({p}, {})}`
pub fn classical_discriminator() -> Discriminator {
    let mut separators = BTreeMap::new();
    separators.insert(0, vec![FormulaSet::new(), set(vec![p("p")])]);
    separators.insert(1, vec![set(vec![p("p")]), FormulaSet::new()]);
    Discriminator::new("p", separators).unwrap()
}

/// Two values, designated {1} opposed to {0}
pub fn two_valued(tables: Vec<(Connective, TruthTable)>) -> GenMatrix {
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

pub fn classical_matrix() -> GenMatrix {
    two_valued(vec![
        (
            Connective::new("&", 2),
            TruthTable::deterministic(2, 2, vec![0, 0, 0, 1]).unwrap(),
        ),
        (
            Connective::new("|", 2),
            TruthTable::deterministic(2, 2, vec![0, 1, 1, 1]).unwrap(),
        ),
        (
            Connective::new("~", 1),
            TruthTable::deterministic(2, 1, vec![1, 0]).unwrap(),
        ),
    ])
}

/// Four values `2x + y` over two independent bits. The pairs are
/// `x = 1 / x = 0` and `y = 1 / y = 0`.
pub fn two_bit_matrix() -> GenMatrix {
    let and_images: Vec<usize> = (0..16).map(|row| (row / 4) & (row % 4)).collect();
    let not_images: Vec<usize> = (0..4).map(|v| 3 - v).collect();
    let tables = vec![
        (Connective::new("&", 2), TruthTable::deterministic(4, 2, and_images).unwrap()),
        (Connective::new("~", 1), TruthTable::deterministic(4, 1, not_images).unwrap()),
    ];
    let signature: Signature = tables.iter().map(|(c, _)| c.clone()).collect();
    let interpretation = tables
        .into_iter()
        .map(|(c, t)| (c.symbol().to_string(), t))
        .collect();
    GenMatrix::new(
        4,
        vec![
            ValueSet::from([2, 3]),
            ValueSet::from([0, 1]),
            ValueSet::from([1, 3]),
            ValueSet::from([0, 2]),
        ],
        signature,
        interpretation,
    )
    .unwrap()
}

/// `p` sits in slot `d` of value `v` exactly when `v` belongs to set `d`
pub fn two_bit_discriminator() -> Discriminator {
    let matrix = two_bit_matrix();
    let mut separators = BTreeMap::new();
    for v in 0..4 {
        let slots = matrix
            .distinguished_sets()
            .iter()
            .map(|dset| {
                if dset.contains(&v) {
                    set(vec![p("p")])
                } else {
                    FormulaSet::new()
                }
            })
            .collect();
        separators.insert(v, slots);
    }
    Discriminator::new("p", separators).unwrap()
}
