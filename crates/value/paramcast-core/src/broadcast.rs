//! Longest-match broadcasting of per-input batches.
//!
//! Sequences shorter than the longest one keep contributing their own last
//! element on every remaining row. A single scalar parameter therefore
//! applies to every element of a long batch without being replicated first.

use std::ops::Index;

use log::error;

use crate::{CoreError, Value};

/// One aligned tuple of per-input values.
#[derive(Clone, Debug, PartialEq)]
pub struct BroadcastRow<T> {
    /// Position of this row in the broadcast output.
    pub index: usize,
    pub values: Vec<T>,
}

impl<T> BroadcastRow<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.values.get(position)
    }
}

impl<T> Index<usize> for BroadcastRow<T> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        &self.values[position]
    }
}

/// Lazy iterator produced by [`zip_longest_fill`].
#[derive(Debug)]
pub struct ZipLongestFill<T> {
    sequences: Vec<std::vec::IntoIter<T>>,
    last: Vec<T>,
    row: usize,
    rows: usize,
}

/// Zip `sequences` to the length of the longest, self-filling the short ones.
///
/// Each sequence's final element is cached up front. A sequence that is empty
/// while others are not contributes `T::default()`.
pub fn zip_longest_fill<T: Clone + Default>(sequences: Vec<Vec<T>>) -> ZipLongestFill<T> {
    let rows = sequences.iter().map(Vec::len).max().unwrap_or(0);
    let last = sequences
        .iter()
        .map(|seq| seq.last().cloned().unwrap_or_default())
        .collect();
    ZipLongestFill {
        sequences: sequences.into_iter().map(Vec::into_iter).collect(),
        last,
        row: 0,
        rows,
    }
}

impl<T: Clone> Iterator for ZipLongestFill<T> {
    type Item = BroadcastRow<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.rows {
            return None;
        }
        let values = self
            .sequences
            .iter_mut()
            .zip(self.last.iter())
            .map(|(seq, last)| seq.next().unwrap_or_else(|| last.clone()))
            .collect();
        let index = self.row;
        self.row += 1;
        Some(BroadcastRow { index, values })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows - self.row;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for ZipLongestFill<T> {}

/// Items a dynamically typed broadcast argument iterates over.
fn iter_items(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::List(items) | Value::Tuple(items) => Some(items.clone()),
        Value::Tensor(t) if !t.shape.is_empty() => Some(t.batch_items()),
        Value::Text(s) => Some(s.chars().map(|c| Value::Text(c.to_string())).collect()),
        Value::Record(pairs) => Some(pairs.iter().map(|(k, _)| Value::Text(k.clone())).collect()),
        _ => None,
    }
}

/// Broadcast raw values, each of which must be iterable.
///
/// A non-iterable argument is a mistake at the call site and is surfaced
/// rather than degraded.
pub fn broadcast_values(args: &[Value]) -> Result<ZipLongestFill<Value>, CoreError> {
    let mut sequences = Vec::with_capacity(args.len());
    for (position, arg) in args.iter().enumerate() {
        match iter_items(arg) {
            Some(items) => sequences.push(items),
            None => {
                error!("broadcast argument {position} is not iterable: {arg}");
                return Err(CoreError::NotIterable {
                    position,
                    value: arg.to_string(),
                });
            }
        }
    }
    Ok(zip_longest_fill(sequences))
}
