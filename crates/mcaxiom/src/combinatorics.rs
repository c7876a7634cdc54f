//! Combinatorial producers: combinations, subsets, cartesian products and
//! the tuple <-> position codec used by truth tables.
//!
//! All producers are plain iterators yielding owned snapshots. Restart one by
//! constructing it again.

use crate::error::{Error, Result};

/// k-combinations of `{0, ..., n-1}` in lexicographic order
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let current = if k <= n { Some((0..k).collect()) } else { None };
        Combinations { n, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let k = current.len();
        // Rightmost index that can still move
        let mut advanced = current.clone();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if advanced[i] < self.n - k + i {
                advanced[i] += 1;
                for j in (i + 1)..k {
                    advanced[j] = advanced[j - 1] + 1;
                }
                self.current = Some(advanced);
                break;
            }
        }
        Some(current)
    }
}

/// Every subset of `{0, ..., n-1}`, by increasing size, each size in
/// lexicographic order. Yields `2^n` subsets, the empty one first.
#[derive(Debug, Clone)]
pub struct SubsetsBySize {
    n: usize,
    k: usize,
    inner: Combinations,
}

impl SubsetsBySize {
    pub fn new(n: usize) -> Self {
        SubsetsBySize {
            n,
            k: 0,
            inner: Combinations::new(n, 0),
        }
    }
}

impl Iterator for SubsetsBySize {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            if let Some(combination) = self.inner.next() {
                return Some(combination);
            }
            if self.k >= self.n {
                return None;
            }
            self.k += 1;
            self.inner = Combinations::new(self.n, self.k);
        }
    }
}

/// Cartesian product of the given choice lists, leftmost list varying slowest.
/// An empty input yields a single empty tuple; any empty list yields nothing.
pub fn cartesian_product<T: Clone>(choices: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut result: Vec<Vec<T>> = vec![Vec::with_capacity(choices.len())];
    for options in choices {
        let mut extended = Vec::with_capacity(result.len() * options.len());
        for prefix in &result {
            for option in options {
                let mut tuple = prefix.clone();
                tuple.push(option.clone());
                extended.push(tuple);
            }
        }
        result = extended;
        if result.is_empty() {
            break;
        }
    }
    result
}

/// Number of rows of an `arity`-ary table over `nvalues` values
pub fn number_of_rows(nvalues: usize, arity: usize) -> Result<usize> {
    u32::try_from(arity)
        .ok()
        .and_then(|exponent| nvalues.checked_pow(exponent))
        .ok_or(Error::TableTooLarge { nvalues, arity })
}

/// Decode the tuple at `position` in the lexicographic order of
/// `{0..nvalues}^arity` (first component most significant).
pub fn tuple_from_position(nvalues: usize, arity: usize, position: usize) -> Result<Vec<usize>> {
    let rows = number_of_rows(nvalues, arity)?;
    if position >= rows {
        return Err(Error::TuplePositionOutOfRange { position, rows });
    }
    let mut tuple = vec![0; arity];
    let mut rest = position;
    for slot in tuple.iter_mut().rev() {
        *slot = rest % nvalues;
        rest /= nvalues;
    }
    Ok(tuple)
}

/// Inverse of [`tuple_from_position`]
pub fn position_from_tuple(nvalues: usize, tuple: &[usize]) -> Result<usize> {
    tuple
        .iter()
        .try_fold(0usize, |acc, &value| acc.checked_mul(nvalues)?.checked_add(value))
        .ok_or(Error::TableTooLarge {
            nvalues,
            arity: tuple.len(),
        })
}
