//! Helpers for dealing with dynamically numbered node inputs (`IMAGE_1`, `IMAGE_2`, ...).

use crate::normalize::Inputs;
use crate::Value;

/// Collect `prefix_1`, `prefix_2`, ... up to the first gap or `None` entry.
/// Every entry becomes a list: batches stay as they are, tensors materialize,
/// anything else is wrapped.
pub fn parse_dynamic(prefix: &str, inputs: &Inputs) -> Vec<Vec<Value>> {
    let mut out = Vec::new();
    for count in 1.. {
        let key = format!("{prefix}_{count}");
        let entry = match inputs.get(&key) {
            Some(Value::None) | None => break,
            Some(Value::List(items)) => items.clone(),
            Some(Value::Tensor(t)) => match t.to_value() {
                Value::List(items) => items,
                scalar => vec![scalar],
            },
            Some(other) => vec![other.clone()],
        };
        out.push(entry);
    }
    out
}
