//! Error types for mcaxiom

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("provide an arity >= 0 (got {0})")]
    NegativeArity(i64),

    #[error("connective {symbol} expects {expected} arguments, got {got}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        got: usize,
    },

    #[error("connective {0} not present")]
    ConnectiveNotPresent(String),

    #[error("connective {0} has no truth table")]
    MissingInterpretation(String),

    #[error("truth table for {symbol} has arity {table}, connective has arity {connective}")]
    TableArityMismatch {
        symbol: String,
        table: usize,
        connective: usize,
    },

    #[error("truth table needs {expected} rows, got {got}")]
    TableSize { expected: usize, got: usize },

    #[error("{nvalues}^{arity} rows exceed the addressable size")]
    TableTooLarge { nvalues: usize, arity: usize },

    #[error("determinant over {got} values, table over {expected}")]
    ValueCountMismatch { expected: usize, got: usize },

    #[error("value {value} outside of [0, {nvalues})")]
    ValueOutOfRange { value: usize, nvalues: usize },

    #[error("tuple position {position} outside of [0, {rows})")]
    TuplePositionOutOfRange { position: usize, rows: usize },

    #[error("distinguished sets must come in opposition pairs, got {0} sets")]
    OddDistinguishedSets(usize),

    #[error("discriminator does not match the matrix: {0}")]
    DiscriminatorDomain(String),

    #[error("expected {expected} dimensions, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("sequent position {position} outside of dimension {dimension}")]
    PositionOutOfRange { position: usize, dimension: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
