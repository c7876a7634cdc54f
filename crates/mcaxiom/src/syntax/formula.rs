//! Connectives, signatures and propositional formulas

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

/// A connective symbol with its arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Connective {
    symbol: String,
    arity: usize,
}

impl Connective {
    pub fn new(symbol: impl Into<String>, arity: usize) -> Self {
        Connective {
            symbol: symbol.into(),
            arity,
        }
    }

    /// Build a connective from a signed arity, as handed over by external
    /// loaders. Negative arities are rejected.
    pub fn try_new(symbol: impl Into<String>, arity: i64) -> Result<Self> {
        if arity < 0 {
            return Err(Error::NegativeArity(arity));
        }
        Ok(Connective::new(symbol, arity as usize))
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// A signature: connective symbol -> connective
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    connectives: BTreeMap<String, Connective>,
}

impl Signature {
    pub fn new() -> Self {
        Signature::default()
    }

    /// Add a connective. An existing entry with the same symbol is kept.
    pub fn add(&mut self, connective: Connective) {
        self.connectives
            .entry(connective.symbol.clone())
            .or_insert(connective);
    }

    /// Look a connective up by its symbol
    pub fn get(&self, symbol: &str) -> Result<&Connective> {
        self.connectives
            .get(symbol)
            .ok_or_else(|| Error::ConnectiveNotPresent(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.connectives.contains_key(symbol)
    }

    /// The sub-signature of connectives with the given arity
    pub fn by_arity(&self, arity: usize) -> Signature {
        let mut result = Signature::new();
        for connective in self.connectives.values().filter(|c| c.arity == arity) {
            result.add(connective.clone());
        }
        result
    }

    /// Join two signatures, preserving the entries of `self`
    pub fn join(&mut self, other: &Signature) {
        for connective in other.connectives.values() {
            self.add(connective.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connective> {
        self.connectives.values()
    }

    pub fn len(&self) -> usize {
        self.connectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectives.is_empty()
    }
}

impl FromIterator<Connective> for Signature {
    fn from_iter<I: IntoIterator<Item = Connective>>(iter: I) -> Self {
        let mut signature = Signature::new();
        for connective in iter {
            signature.add(connective);
        }
        signature
    }
}

/// The two shapes a formula can take.
///
/// The derived order compares the variant first (propositions before
/// compounds), then the symbol, then the children left to right. Every
/// formula container in the crate relies on this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormulaKind {
    Prop(String),
    Compound(Connective, Vec<Formula>),
}

/// An immutable, reference-counted formula tree
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Formula(Rc<FormulaKind>);

/// Ordered set of formulas
pub type FormulaSet = BTreeSet<Formula>;

impl Formula {
    pub fn prop(name: impl Into<String>) -> Formula {
        Formula(Rc::new(FormulaKind::Prop(name.into())))
    }

    /// Build a compound, checking the number of children against the arity
    pub fn compound(connective: &Connective, children: Vec<Formula>) -> Result<Formula> {
        if children.len() != connective.arity {
            return Err(Error::ArityMismatch {
                symbol: connective.symbol.clone(),
                expected: connective.arity,
                got: children.len(),
            });
        }
        Ok(Formula(Rc::new(FormulaKind::Compound(
            connective.clone(),
            children,
        ))))
    }

    /// Children count must already match the arity (substitution keeps it)
    pub(crate) fn compound_unchecked(connective: Connective, children: Vec<Formula>) -> Formula {
        debug_assert_eq!(children.len(), connective.arity);
        Formula(Rc::new(FormulaKind::Compound(connective, children)))
    }

    pub fn kind(&self) -> &FormulaKind {
        &self.0
    }

    pub fn is_prop(&self) -> bool {
        matches!(*self.0, FormulaKind::Prop(_))
    }

    /// Name of the proposition, if this is one
    pub fn prop_name(&self) -> Option<&str> {
        match &*self.0 {
            FormulaKind::Prop(name) => Some(name),
            FormulaKind::Compound(..) => None,
        }
    }

    pub fn connective(&self) -> Option<&Connective> {
        match &*self.0 {
            FormulaKind::Prop(_) => None,
            FormulaKind::Compound(connective, _) => Some(connective),
        }
    }

    pub fn children(&self) -> &[Formula] {
        match &*self.0 {
            FormulaKind::Prop(_) => &[],
            FormulaKind::Compound(_, children) => children,
        }
    }

    /// Number of symbol occurrences
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Formula::size).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Formula::depth).max().unwrap_or(0)
    }

    /// Collect every subformula (the formula itself included)
    pub fn collect_subformulas(&self, out: &mut FormulaSet) {
        if out.insert(self.clone()) {
            for child in self.children() {
                child.collect_subformulas(out);
            }
        }
    }

    pub fn subformulas(&self) -> FormulaSet {
        let mut out = FormulaSet::new();
        self.collect_subformulas(&mut out);
        out
    }

    /// Collect the names of the propositional variables
    pub fn collect_props(&self, out: &mut BTreeSet<String>) {
        match &*self.0 {
            FormulaKind::Prop(name) => {
                out.insert(name.clone());
            }
            FormulaKind::Compound(_, children) => {
                for child in children {
                    child.collect_props(out);
                }
            }
        }
    }

    pub fn props(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_props(&mut out);
        out
    }

    /// The least signature containing every connective of the formula
    pub fn signature(&self) -> Signature {
        let mut signature = Signature::new();
        self.collect_signature(&mut signature);
        signature
    }

    pub(crate) fn collect_signature(&self, signature: &mut Signature) {
        if let FormulaKind::Compound(connective, children) = &*self.0 {
            signature.add(connective.clone());
            for child in children {
                child.collect_signature(signature);
            }
        }
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            FormulaKind::Prop(name) => write!(f, "{}", name),
            FormulaKind::Compound(connective, children) => match children.as_slice() {
                [] => write!(f, "{}", connective.symbol),
                [left, right] => write!(f, "({} {} {})", left, connective.symbol, right),
                _ => {
                    write!(f, "{}(", connective.symbol)?;
                    for (i, child) in children.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", child)?;
                    }
                    write!(f, ")")
                }
            },
        }
    }
}

/// Fresh propositional variables `p1, ..., pk`
pub fn numbered_props(k: usize) -> Vec<Formula> {
    (1..=k).map(|i| Formula::prop(format!("p{}", i))).collect()
}
