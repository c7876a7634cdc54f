//! Bounded derivation search
//!
//! A node holds one formula set per dimension and closes when, for some
//! dimension, its set meets the statement's conclusions there. An open node
//! tries the applicable rule instances in selector order. An axiom instance
//! closes it. Any other instance branches once per conclusion formula, and
//! succeeds when every branch closes.
//!
//! Nodes only grow inside the finite analytic universe, so the search ends
//! without a depth bound. The tree is built on an explicit stack of frames
//! instead of the call stack.

use super::analytic::analytic_universe;
use super::rule::MultipleConclusionRule;
use super::selection::{build_selector, InstanceSelector};
use super::sequent::fmt_sets;
use crate::config::SearchConfig;
use crate::syntax::{all_substitutions, match_with_subst, Formula, FormulaSet, Substitution};
use indexmap::IndexSet;
use std::fmt;
use tracing::{debug_span, trace};

/// One node of a derivation tree
#[derive(Debug, Clone)]
pub struct DerivationTreeNode {
    pub formulas: Vec<FormulaSet>,
    /// The instance applied at this node, if any
    pub rule_instance: Option<MultipleConclusionRule>,
    pub children: Vec<DerivationTreeNode>,
    pub closed: bool,
    pub is_axiom_leaf: bool,
}

impl DerivationTreeNode {
    fn leaf(formulas: Vec<FormulaSet>, closed: bool) -> Self {
        DerivationTreeNode {
            formulas,
            rule_instance: None,
            children: Vec::new(),
            closed,
            is_axiom_leaf: false,
        }
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(DerivationTreeNode::size).sum::<usize>()
    }

    pub fn height(&self) -> usize {
        1 + self.children.iter().map(DerivationTreeNode::height).max().unwrap_or(0)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = indent * 2)?;
        fmt_sets(f, &self.formulas)?;
        match &self.rule_instance {
            Some(instance) if self.is_axiom_leaf => write!(f, " by {} (axiom)", instance.name())?,
            Some(instance) => write!(f, " by {}", instance.name())?,
            None if self.closed => write!(f, " *")?,
            None => write!(f, " open")?,
        }
        writeln!(f)?;
        for child in &self.children {
            child.render(f, indent + 1)?;
        }
        Ok(())
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub instances_tried: usize,
    pub universe_size: usize,
}

/// Result of a derivability query
#[derive(Debug, Clone)]
pub struct DerivationTree {
    pub root: DerivationTreeNode,
    pub stats: SearchStats,
}

impl DerivationTree {
    /// Whether the statement was derived
    pub fn closed(&self) -> bool {
        self.root.closed
    }
}

impl fmt::Display for DerivationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.render(f, 0)
    }
}

struct Attempt {
    instance: MultipleConclusionRule,
    branches: std::vec::IntoIter<(usize, Formula)>,
    children: Vec<DerivationTreeNode>,
}

struct Frame {
    formulas: Vec<FormulaSet>,
    depth: usize,
    candidates: std::vec::IntoIter<MultipleConclusionRule>,
    attempt: Option<Attempt>,
}

enum Opened {
    Leaf(DerivationTreeNode),
    Frame(Frame),
}

enum Step {
    Descend(Vec<FormulaSet>, usize),
    Finish(DerivationTreeNode),
}

/// Search engine for one statement over one rule list
pub struct DerivationSearch<'a> {
    rules: &'a [MultipleConclusionRule],
    targets: Vec<FormulaSet>,
    universe: FormulaSet,
    max_depth: Option<usize>,
    selector: Box<dyn InstanceSelector>,
    stats: SearchStats,
}

impl<'a> DerivationSearch<'a> {
    /// Rules whose dimension count differs from the statement's are ignored
    pub fn new(
        rules: &'a [MultipleConclusionRule],
        statement: &MultipleConclusionRule,
        generating: &FormulaSet,
        config: &SearchConfig,
    ) -> Self {
        let universe = analytic_universe(
            generating,
            &statement.sequent().collect_formulas(),
            config.analyticity_level,
        );
        DerivationSearch {
            rules,
            targets: statement.conclusions().to_vec(),
            stats: SearchStats {
                universe_size: universe.len(),
                ..SearchStats::default()
            },
            universe,
            max_depth: config.max_depth,
            selector: build_selector(&config.instance_order),
        }
    }

    pub fn run(mut self, premises: Vec<FormulaSet>) -> DerivationTree {
        let _span = debug_span!("derive", selector = self.selector.name()).entered();
        let root = self.search(premises);
        trace!(
            closed = root.closed,
            nodes = self.stats.nodes_expanded,
            instances = self.stats.instances_tried,
            "search finished"
        );
        DerivationTree {
            root,
            stats: self.stats,
        }
    }

    fn search(&mut self, premises: Vec<FormulaSet>) -> DerivationTreeNode {
        let mut stack = match self.open(premises, 0) {
            Opened::Leaf(node) => return node,
            Opened::Frame(frame) => vec![frame],
        };
        let mut returned: Option<DerivationTreeNode> = None;
        loop {
            let step = match stack.last_mut() {
                Some(frame) => self.step(frame, returned.take()),
                None => return DerivationTreeNode::leaf(Vec::new(), false),
            };
            match step {
                Step::Descend(formulas, depth) => match self.open(formulas, depth) {
                    Opened::Leaf(node) => returned = Some(node),
                    Opened::Frame(frame) => stack.push(frame),
                },
                Step::Finish(node) => {
                    stack.pop();
                    if stack.is_empty() {
                        return node;
                    }
                    returned = Some(node);
                }
            }
        }
    }

    fn open(&mut self, formulas: Vec<FormulaSet>, depth: usize) -> Opened {
        self.stats.nodes_expanded += 1;
        if self.closes(&formulas) {
            return Opened::Leaf(DerivationTreeNode::leaf(formulas, true));
        }
        if self.max_depth.map_or(false, |max| depth >= max) {
            // Only axiom instances fit under the bound
            let axiom = self
                .instances(&formulas)
                .into_iter()
                .find(MultipleConclusionRule::all_conclusions_empty);
            return Opened::Leaf(match axiom {
                Some(instance) => {
                    self.stats.instances_tried += 1;
                    DerivationTreeNode {
                        formulas,
                        rule_instance: Some(instance),
                        children: Vec::new(),
                        closed: true,
                        is_axiom_leaf: true,
                    }
                }
                None => DerivationTreeNode::leaf(formulas, false),
            });
        }
        let mut candidates = self.instances(&formulas);
        self.selector.order(&mut candidates);
        trace!(depth, candidates = candidates.len(), "expanding node");
        Opened::Frame(Frame {
            formulas,
            depth,
            candidates: candidates.into_iter(),
            attempt: None,
        })
    }

    fn step(&mut self, frame: &mut Frame, returned: Option<DerivationTreeNode>) -> Step {
        if let Some(child) = returned {
            if child.closed {
                if let Some(attempt) = frame.attempt.as_mut() {
                    attempt.children.push(child);
                }
            } else {
                frame.attempt = None;
            }
        }

        if let Some(attempt) = frame.attempt.as_mut() {
            if let Some((dimension, formula)) = attempt.branches.next() {
                let mut formulas = frame.formulas.clone();
                formulas[dimension].insert(formula);
                return Step::Descend(formulas, frame.depth + 1);
            }
            if let Some(attempt) = frame.attempt.take() {
                return Step::Finish(DerivationTreeNode {
                    formulas: std::mem::take(&mut frame.formulas),
                    rule_instance: Some(attempt.instance),
                    children: attempt.children,
                    closed: true,
                    is_axiom_leaf: false,
                });
            }
        }

        match frame.candidates.next() {
            Some(instance) => {
                self.stats.instances_tried += 1;
                if instance.all_conclusions_empty() {
                    return Step::Finish(DerivationTreeNode {
                        formulas: std::mem::take(&mut frame.formulas),
                        rule_instance: Some(instance),
                        children: Vec::new(),
                        closed: true,
                        is_axiom_leaf: true,
                    });
                }
                let branches: Vec<(usize, Formula)> = instance
                    .conclusions()
                    .iter()
                    .enumerate()
                    .flat_map(|(d, set)| set.iter().map(move |f| (d, f.clone())))
                    .collect();
                frame.attempt = Some(Attempt {
                    instance,
                    branches: branches.into_iter(),
                    children: Vec::new(),
                });
                // Pick up the first branch on the next step
                self.step(frame, None)
            }
            None => Step::Finish(DerivationTreeNode::leaf(
                std::mem::take(&mut frame.formulas),
                false,
            )),
        }
    }

    fn closes(&self, formulas: &[FormulaSet]) -> bool {
        formulas
            .iter()
            .zip(&self.targets)
            .any(|(node, target)| !node.is_disjoint(target))
    }

    /// Applicable instances whose conclusions lie in the universe and add
    /// something new on every branch
    fn instances(&self, formulas: &[FormulaSet]) -> Vec<MultipleConclusionRule> {
        let mut found: IndexSet<MultipleConclusionRule> = IndexSet::new();
        for rule in self.rules {
            if rule.dimensions() != formulas.len() {
                continue;
            }
            let patterns: Vec<(usize, Formula)> = rule
                .premises()
                .iter()
                .enumerate()
                .flat_map(|(d, set)| set.iter().map(move |f| (d, f.clone())))
                .collect();
            let mut matches = Vec::new();
            match_premises(&patterns, formulas, Substitution::new(), &mut matches);
            let props = rule.collect_props();
            for partial in matches {
                let free: Vec<String> = props
                    .iter()
                    .filter(|p| !partial.contains(p))
                    .cloned()
                    .collect();
                for extension in all_substitutions(&free, &self.universe) {
                    let mut subst = partial.clone();
                    subst.map.extend(extension.map);
                    let instance = rule.instantiate(&subst);
                    if self.useful(&instance, formulas) {
                        found.insert(instance);
                    }
                }
            }
        }
        found.into_iter().collect()
    }

    fn useful(&self, instance: &MultipleConclusionRule, formulas: &[FormulaSet]) -> bool {
        instance
            .conclusions()
            .iter()
            .zip(formulas)
            .all(|(conclusions, node)| {
                conclusions
                    .iter()
                    .all(|f| self.universe.contains(f) && !node.contains(f))
            })
    }
}

fn match_premises(
    patterns: &[(usize, Formula)],
    formulas: &[FormulaSet],
    subst: Substitution,
    out: &mut Vec<Substitution>,
) {
    let Some(((dimension, pattern), rest)) = patterns.split_first() else {
        out.push(subst);
        return;
    };
    for target in &formulas[*dimension] {
        let mut extended = subst.clone();
        if match_with_subst(pattern, target, &mut extended).is_ok() {
            match_premises(rest, formulas, extended, out);
        }
    }
}
