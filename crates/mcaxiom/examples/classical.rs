use mcaxiom::{
    Axiomatizer, AxiomatizerConfig, Connective, Discriminator, Formula, FormulaSet, GenMatrix,
    MultipleConclusionRule, NdSequent, Signature, TruthTable, ValueSet,
};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Optional JSON config, e.g. {"derivation_max_depth": 2}
    let config: AxiomatizerConfig = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).expect("Failed to read config");
            serde_json::from_str(&text).expect("Failed to parse config")
        }
        None => AxiomatizerConfig::default(),
    };

    let and = Connective::new("&", 2);
    let or = Connective::new("|", 2);
    let neg = Connective::new("~", 1);
    let signature: Signature = vec![and.clone(), or.clone(), neg.clone()].into_iter().collect();
    let mut interpretation = BTreeMap::new();
    interpretation.insert("&".to_string(), TruthTable::deterministic(2, 2, vec![0, 0, 0, 1]).unwrap());
    interpretation.insert("|".to_string(), TruthTable::deterministic(2, 2, vec![0, 1, 1, 1]).unwrap());
    interpretation.insert("~".to_string(), TruthTable::deterministic(2, 1, vec![1, 0]).unwrap());
    let matrix = GenMatrix::new(
        2,
        vec![ValueSet::from([1]), ValueSet::from([0])],
        signature,
        interpretation,
    )
    .expect("Failed to build matrix");

    let p = Formula::prop("p");
    let mut separators = BTreeMap::new();
    separators.insert(0, vec![FormulaSet::new(), FormulaSet::from([p.clone()])]);
    separators.insert(1, vec![FormulaSet::from([p]), FormulaSet::new()]);
    let discriminator = Discriminator::new("p", separators).expect("Failed to build discriminator");

    let axiomatizer = Axiomatizer::with_identity_layout(&discriminator, &matrix, config.clone())
        .expect("Matrix and discriminator disagree");

    println!("=== RULE GROUPS ===");
    for (group, calculus) in axiomatizer.make_calculus().expect("Failed to generate rules") {
        println!("{} ({} rules)", group, calculus.len());
        for rule in calculus.iter() {
            println!("  {}", rule);
        }
    }

    let calculus = axiomatizer
        .make_single_calculus()
        .expect("Failed to generate calculus");
    println!("\n=== CALCULUS ({} rules) ===", calculus.len());
    print!("{}", calculus);

    // ~(a & b) |- ~a | ~b
    let (a, b) = (Formula::prop("a"), Formula::prop("b"));
    let premise = Formula::compound(&neg, vec![Formula::compound(&and, vec![a.clone(), b.clone()]).unwrap()]).unwrap();
    let conclusion = Formula::compound(
        &or,
        vec![
            Formula::compound(&neg, vec![a]).unwrap(),
            Formula::compound(&neg, vec![b]).unwrap(),
        ],
    )
    .unwrap();
    let statement = MultipleConclusionRule::new(
        "de-morgan",
        NdSequent::new(vec![FormulaSet::from([premise]), FormulaSet::from([conclusion])]),
        axiomatizer.layout().correspondence(),
    )
    .unwrap();

    let tree = calculus.derive(&statement, &axiomatizer.generating_formulas(), &config.search);
    println!("\n=== DERIVATION OF {} ===", statement);
    print!("{}", tree);
    println!(
        "closed: {}, nodes: {}, instances: {}, universe: {}",
        tree.closed(),
        tree.stats.nodes_expanded,
        tree.stats.instances_tried,
        tree.stats.universe_size
    );
}
