//! Turn one named node input into a per-batch-element sequence of coerced values.

use hashbrown::HashMap;

use crate::coercion::parse_value;
use crate::{CoerceOptions, Value, ValueKind};

/// Raw keyword inputs as the host hands them to a node.
pub type Inputs = HashMap<String, Value>;

/// Coerce the input named `key` into one value per batch element.
///
/// A missing input resolves from `default`. Only a `List` (or a tensor,
/// materialized along its batch axis) counts as a batch; anything else is a
/// single element. The result is never empty.
pub fn parse_parameter(
    key: &str,
    inputs: &Inputs,
    default: &Value,
    kind: ValueKind,
    opts: &CoerceOptions,
) -> Vec<Value> {
    let default = match default {
        Value::List(_) | Value::Tuple(_) | Value::Tensor(_) => default.clone(),
        other => Value::List(vec![other.clone()]),
    };

    let unified = match inputs.get(key).unwrap_or(&default) {
        Value::Tensor(t) => t.to_value(),
        other => other.clone(),
    };
    let mut batch = match unified {
        Value::List(items) => items,
        other => vec![other],
    };

    if batch.is_empty() {
        let first = match &default {
            Value::List(items) | Value::Tuple(items) => items.first().cloned(),
            Value::Tensor(t) => t.batch_items().into_iter().next(),
            _ => None,
        };
        batch.push(first.unwrap_or(Value::Int(0)));
    }

    batch
        .iter()
        .map(|item| parse_value(item, kind, &default, opts))
        .collect()
}
