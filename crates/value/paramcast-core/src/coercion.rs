//! Scalar/vector coercion of raw values into a target [`ValueKind`].
//!
//! Rules:
//! - the raw value is flattened into a working sequence (scalars wrap,
//!   records contribute their values, a latent record its `samples`)
//! - vector kinds pad missing trailing slots from the defaults, else by
//!   repeating the sequence's own last element
//! - numeric slots are parsed, rounded (float kinds) or truncated (int kinds),
//!   clamped, and zero-substituted; unparsable slots fall back to a code point
//!   and finally to 0 with a warning
//! - a single-element result collapses to the bare element, except for LIST

use log::warn;

use crate::{CoerceOptions, Value, ValueKind};

/// Flatten `val` into the working sequence. Tensors are materialized unless
/// `keep_tensors` is set, in which case they stay a single opaque element.
pub fn as_sequence(val: &Value, keep_tensors: bool) -> Vec<Value> {
    match val {
        Value::Tensor(t) if !keep_tensors => as_sequence(&t.to_value(), keep_tensors),
        Value::List(items) | Value::Tuple(items) => items.clone(),
        Value::Record(pairs) => match val.get("samples") {
            Some(samples) => as_sequence(samples, keep_tensors),
            None => pairs.iter().map(|(_, v)| v.clone()).collect(),
        },
        other => vec![other.clone()],
    }
}

/// Coerce `raw` into `kind`.
///
/// `default` supplies per-slot fallbacks: it pads short vectors and replaces
/// `None` slots. See the module docs for the full rule set.
pub fn parse_value(
    raw: &Value,
    kind: ValueKind,
    default: &Value,
    opts: &CoerceOptions,
) -> Value {
    let defaults = as_sequence(default, false);
    let mut seq = as_sequence(raw, kind.keeps_tensors());

    if kind.is_vector() {
        pad_components(&mut seq, &defaults, kind.component_count());
    }

    let mut seq = match kind {
        k if k.is_numeric() => coerce_numeric(seq, k, &defaults, opts),
        ValueKind::String => {
            let joined = seq
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            vec![Value::Text(joined)]
        }
        ValueKind::Boolean => seq.iter().map(|v| Value::Bool(boolean_of(v))).collect(),
        ValueKind::Dict => {
            let pairs = seq
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect();
            vec![Value::Record(pairs)]
        }
        _ => seq,
    };

    if kind == ValueKind::List {
        return Value::List(vec![Value::List(seq)]);
    }
    if seq.len() == 1 {
        if let Some(only) = seq.pop() {
            return only;
        }
    }
    Value::List(seq)
}

fn pad_components(seq: &mut Vec<Value>, defaults: &[Value], size: usize) {
    while seq.len() < size {
        let idx = seq.len();
        let fill = defaults
            .get(idx)
            .or(seq.last())
            .cloned()
            .unwrap_or(Value::None);
        seq.push(fill);
    }
}

fn boolean_of(v: &Value) -> bool {
    match v {
        // tuples are not among the host's truthy-capable types
        Value::Tuple(_) => false,
        other => other.is_truthy(),
    }
}

fn coerce_numeric(
    mut seq: Vec<Value>,
    kind: ValueKind,
    defaults: &[Value],
    opts: &CoerceOptions,
) -> Vec<Value> {
    let size = kind.component_count();
    if seq.len() < size {
        seq.resize(size, Value::None);
    }

    for idx in 0..size {
        let slot = match std::mem::take(&mut seq[idx]) {
            Value::Text(s) => Value::Text(truncate_decimal(&s)),
            v if v.is_container() => Value::Int(0),
            v => v,
        };
        let candidate = if slot.is_none() {
            defaults
                .get(idx)
                .or(seq.last())
                .cloned()
                .unwrap_or(Value::None)
        } else {
            slot
        };
        seq[idx] = coerce_component(&candidate, kind, opts);
    }

    seq.truncate(size);
    seq
}

fn coerce_component(v: &Value, kind: ValueKind, opts: &CoerceOptions) -> Value {
    let integral = kind.is_integral();
    if let Some(x) = read_number(v, integral) {
        let x = if integral { x } else { round12(x) };
        let mut x = opts.clamp_value(x);
        if integral {
            x = x.trunc();
        }
        let x = opts.substitute_zero(x);
        return typed(x, integral);
    }

    if let Some(code) = single_code_point(v) {
        return typed(code as f64, integral);
    }

    warn!("value not converted well {v} == 0");
    typed(0.0, integral)
}

fn typed(x: f64, integral: bool) -> Value {
    if integral {
        Value::Int(x as i64)
    } else {
        Value::Float(x)
    }
}

fn read_number(v: &Value, integral: bool) -> Option<f64> {
    let x = match v {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::Text(s) if integral => s.trim().parse::<i64>().ok().map(|i| i as f64),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        Value::Tensor(t) => t.scalar(),
        _ => None,
    }?;
    if integral {
        // integer conversion of nan/inf fails on the host too
        x.is_finite().then(|| x.trunc())
    } else {
        Some(x)
    }
}

fn single_code_point(v: &Value) -> Option<u32> {
    let s = v.as_str()?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32),
        _ => None,
    }
}

/// Keep at most one decimal point: "1.2.3" reads as "1.2".
fn truncate_decimal(s: &str) -> String {
    let mut parts = s.splitn(3, '.');
    match (parts.next(), parts.next()) {
        (Some(whole), Some(frac)) => format!("{whole}.{frac}"),
        _ => s.to_string(),
    }
}

fn round12(x: f64) -> f64 {
    const SCALE: f64 = 1e12;
    if !x.is_finite() || x.abs() >= 1e15 {
        return x;
    }
    (x * SCALE).round() / SCALE
}
