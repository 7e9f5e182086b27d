//! Value: the runtime form of every input a host hands to a node.
//!
//! Host data is converted into [`Value`] once at the boundary and matched
//! exhaustively afterwards; nothing downstream probes raw host types.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

/// Batched tensor-like payload. The first dimension is the batch axis.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tensor {
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl Tensor {
    /// Deepest shape accepted when materializing.
    pub const MAX_RANK: usize = 32;

    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Self {
        Tensor { shape, data }
    }

    /// Number of scalar slots implied by the shape (1 for a 0-dim tensor),
    /// or `None` when the product overflows.
    pub fn numel(&self) -> Option<usize> {
        checked_numel(&self.shape)
    }

    /// True when the shape describes exactly `data`. Every partial product
    /// of the shape is bounded by the data length, so walking a well-formed
    /// tensor never allocates more nodes than it has elements.
    pub fn is_well_formed(&self) -> bool {
        if self.shape.len() > Self::MAX_RANK {
            return false;
        }
        let bound = self.data.len().max(1);
        let mut prefix = 1usize;
        for &dim in &self.shape {
            match prefix.checked_mul(dim) {
                Some(p) if p <= bound => prefix = p,
                _ => return false,
            }
        }
        prefix == self.data.len()
    }

    /// The single element of a one-element tensor.
    pub fn scalar(&self) -> Option<f64> {
        if self.is_well_formed() && self.data.len() == 1 {
            self.data.first().copied()
        } else {
            None
        }
    }

    /// Sub-tensors along the first dimension. A 0-dim or malformed tensor
    /// has none.
    pub fn batch_items(&self) -> Vec<Value> {
        if !self.is_well_formed() {
            warn!("dropping malformed tensor of shape {:?} with {} values", self.shape, self.data.len());
            return Vec::new();
        }
        let Some((&outer, rest)) = self.shape.split_first() else {
            return Vec::new();
        };
        let chunk = checked_numel(rest).unwrap_or(0);
        (0..outer)
            .map(|i| {
                let data = slice_or_empty(&self.data, i * chunk, chunk).to_vec();
                Value::Tensor(Tensor::new(rest.to_vec(), data))
            })
            .collect()
    }

    /// Materialize into nested lists of floats. A malformed tensor becomes
    /// `None` so that coercion falls back to defaults.
    pub fn to_value(&self) -> Value {
        if !self.is_well_formed() {
            warn!("dropping malformed tensor of shape {:?} with {} values", self.shape, self.data.len());
            return Value::None;
        }
        materialize(&self.shape, &self.data)
    }
}

fn checked_numel(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

fn slice_or_empty(data: &[f64], start: usize, len: usize) -> &[f64] {
    start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .unwrap_or(&[])
}

fn materialize(shape: &[usize], data: &[f64]) -> Value {
    match shape.split_first() {
        None => Value::Float(data.first().copied().unwrap_or(0.0)),
        Some((&outer, rest)) => {
            let chunk = checked_numel(rest).unwrap_or(0);
            let items = (0..outer)
                .map(|i| materialize(rest, slice_or_empty(data, i * chunk, chunk)))
                .collect();
            Value::List(items)
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Absent value; resolved from defaults during coercion
    #[default]
    None,

    Bool(bool),

    Int(i64),

    Float(f64),

    Text(String),

    /// Ordered sequence. At the top level of an input this is a batch.
    List(Vec<Value>),

    /// Fixed-arity container (e.g. a widget's vector). Never a batch.
    Tuple(Vec<Value>),

    /// String-keyed mapping, insertion ordered
    Record(Vec<(String, Value)>),

    /// Batched tensor-like object
    Tensor(Tensor),
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn record(pairs: impl IntoIterator<Item = (impl Into<String>, Value)>) -> Self {
        Value::Record(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// True for containers that carry no meaningful scalar reading.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Tuple(_) | Value::Record(_))
    }

    /// Truthiness as the host language defines it. Tensors are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
            Value::Record(pairs) => !pairs.is_empty(),
            Value::Tensor(_) => true,
        }
    }

    /// Numeric reading of a scalar-like value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Tensor(t) => t.scalar(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Items of a `List` or `Tuple`.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Value under `key` when this is a record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Numeric components: a scalar yields one entry, sequences yield one per
    /// item (non-numeric items read as 0).
    pub fn as_components(&self) -> Vec<f64> {
        match self {
            Value::List(items) | Value::Tuple(items) => items
                .iter()
                .map(|item| item.as_f64().unwrap_or(0.0))
                .collect(),
            other => vec![other.as_f64().unwrap_or(0.0)],
        }
    }

    /// Read a 4-component vector, zero-padding anything shorter.
    pub fn as_vec4(&self) -> [f64; 4] {
        let comps = self.as_components();
        let mut out = [0.0; 4];
        for (slot, v) in out.iter_mut().zip(comps) {
            *slot = v;
        }
        out
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => fmt_float(f, *v),
            Value::Text(s) if nested => write!(f, "'{s}'"),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                fmt_items(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                fmt_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Record(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{k}': ")?;
                    v.fmt_nested(f, true)?;
                }
                f.write_str("}")
            }
            Value::Tensor(t) if !t.is_well_formed() => {
                write!(f, "tensor(shape={:?}, len={})", t.shape, t.data.len())
            }
            Value::Tensor(t) => {
                f.write_str("tensor(")?;
                t.to_value().fmt_nested(f, true)?;
                f.write_str(")")
            }
        }
    }
}

fn fmt_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt_nested(f, true)?;
    }
    Ok(())
}

fn fmt_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("nan")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "inf" } else { "-inf" })
    } else {
        // Debug keeps a trailing ".0" on integral floats
        write!(f, "{v:?}")
    }
}

/// Renders the way the host prints values when joining them into text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, false)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Tensor> for Value {
    fn from(v: Tensor) -> Self {
        Value::Tensor(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tensor_materializes_nested_lists() {
        let t = Tensor::new(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            t.to_value(),
            Value::List(vec![Value::list([1.0, 2.0]), Value::list([3.0, 4.0])])
        );
        assert_eq!(Tensor::new(vec![], vec![7.0]).to_value(), Value::Float(7.0));
    }

    #[test]
    fn tensor_batch_items_strip_first_dimension() {
        let t = Tensor::new(vec![3], vec![1.0, 2.0, 3.0]);
        let items = t.batch_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].as_f64(), Some(3.0));
    }

    #[test]
    fn malformed_tensors_degrade_to_nothing() {
        let huge = Tensor::new(vec![1, 1 << 32, 1 << 32, 4], vec![]);
        assert_eq!(huge.numel(), None);
        assert!(!huge.is_well_formed());
        assert_eq!(huge.to_value(), Value::None);
        assert!(huge.batch_items().is_empty());

        let short = Tensor::new(vec![3], vec![]);
        assert!(!short.is_well_formed());
        assert_eq!(short.to_value(), Value::None);
        assert_eq!(short.scalar(), None);

        let hollow = Tensor::new(vec![1 << 40, 0], vec![]);
        assert_eq!(hollow.numel(), Some(0));
        assert!(!hollow.is_well_formed());

        let deep = Tensor::new(vec![1; Tensor::MAX_RANK + 1], vec![1.0]);
        assert!(!deep.is_well_formed());
        assert_eq!(Value::Tensor(short).to_string(), "tensor(shape=[3], len=0)");
    }

    #[test]
    fn empty_batch_dimension_is_well_formed() {
        let t = Tensor::new(vec![0, 5], vec![]);
        assert!(t.is_well_formed());
        assert_eq!(t.to_value(), Value::List(vec![]));
    }

    #[test]
    fn display_matches_host_rendering() {
        let v = Value::List(vec![
            Value::Float(1.0),
            Value::Int(2),
            Value::Bool(true),
            Value::from("a"),
            Value::None,
        ]);
        assert_eq!(v.to_string(), "[1.0, 2, True, 'a', None]");
        assert_eq!(Value::tuple([5i64]).to_string(), "(5,)");
        assert_eq!(Value::from("raw").to_string(), "raw");
    }

    #[test]
    fn truthiness_follows_host_rules() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(!Value::List(vec![]).is_truthy());
        assert!(Value::Tensor(Tensor::new(vec![0], vec![])).is_truthy());
    }
}
