//! Bounded formula universe for analytic proof search.
//!
//! Starting from the subformulas `S_0` of a statement, each level adds every
//! instance of a generating formula whose variables are replaced by members
//! of the previous level:
//!
//! ```text
//! S_k = S_{k-1} ∪ { φσ | φ ∈ Φ, σ : vars(φ) → S_{k-1} }
//! ```
//!
//! Only `S_0` is closed under subformulas. A proper subformula of an instance
//! joins the universe only if it is itself an instance or in `S_0`.

use crate::syntax::{all_substitutions, FormulaSet};
use tracing::trace;

pub fn analytic_universe(generating: &FormulaSet, statement: &FormulaSet, level: usize) -> FormulaSet {
    let mut universe = FormulaSet::new();
    for formula in statement {
        formula.collect_subformulas(&mut universe);
    }
    for round in 1..=level {
        let previous = universe.clone();
        for phi in generating {
            let vars: Vec<String> = phi.props().into_iter().collect();
            for subst in all_substitutions(&vars, &previous) {
                universe.insert(phi.apply_substitution(&subst));
            }
        }
        trace!(round, size = universe.len(), "analytic universe level");
        if universe.len() == previous.len() {
            break;
        }
    }
    universe
}
