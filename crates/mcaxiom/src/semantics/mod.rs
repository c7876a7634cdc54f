//! Matrix semantics
//!
//! Truth tables, generalized matrices, valuations, sequent validity and the
//! discriminator that turns values into separating formulas.

pub mod discriminator;
pub mod genmatrix;
pub mod truth_table;
pub mod validity;

pub use discriminator::Discriminator;
pub use genmatrix::{GenMatrix, Valuation, ValuationIter};
pub use truth_table::{Determinant, TruthTable, Value, ValueSet};
pub use validity::{CounterExample, SequentValidator};
