//! Nested record helpers: dotted-path updates and recursive merging.

use crate::Value;

type Pairs = Vec<(String, Value)>;

fn entry<'a>(pairs: &'a mut Pairs, key: &str) -> Option<&'a mut Value> {
    pairs.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn set(pairs: &mut Pairs, key: &str, value: Value) {
    match entry(pairs, key) {
        Some(slot) => *slot = value,
        None => pairs.push((key.to_string(), value)),
    }
}

/// Descend into (or create) the record stored under `key`. A non-record value
/// already at `key` is replaced by an empty record.
fn child<'a>(pairs: &'a mut Pairs, key: &str) -> Option<&'a mut Pairs> {
    let idx = match pairs.iter().position(|(k, _)| k == key) {
        Some(idx) => idx,
        None => {
            pairs.push((key.to_string(), Value::Record(Vec::new())));
            pairs.len() - 1
        }
    };
    let slot = &mut pairs[idx].1;
    if !matches!(slot, Value::Record(_)) {
        *slot = Value::Record(Vec::new());
    }
    match slot {
        Value::Record(inner) => Some(inner),
        _ => None,
    }
}

/// Write `value` at the dotted `path`, creating intermediate records.
///
/// When the target already holds a record and `value` is one too, the keys of
/// `value` are merged into it; otherwise the target is replaced. A `root` that
/// is not a record becomes an empty record first.
pub fn update_nested(root: &mut Value, path: &str, value: Value) {
    if !matches!(root, Value::Record(_)) {
        *root = Value::Record(Vec::new());
    }
    let Value::Record(current) = root else {
        return;
    };

    let mut keys: Vec<&str> = path.split('.').collect();
    let last = keys.pop().unwrap_or_default();
    let mut cursor = current;
    for key in keys {
        let Some(next) = child(cursor, key) else {
            return;
        };
        cursor = next;
    }

    let value = match (entry(cursor, last), value) {
        (Some(Value::Record(existing)), Value::Record(incoming)) => {
            for (k, v) in incoming {
                set(existing, &k, v);
            }
            return;
        }
        (_, value) => value,
    };
    set(cursor, last, value);
}

/// Merge values left to right. Records merge key-wise and recursively, lists
/// under the same key concatenate, and anything else is replaced by the
/// right-hand side.
pub fn deep_merge(values: &[Value]) -> Value {
    values
        .iter()
        .fold(Value::Record(Vec::new()), |acc, next| merge_two(acc, next))
}

fn merge_two(left: Value, right: &Value) -> Value {
    let (Value::Record(mut merged), Value::Record(incoming)) = (left, right) else {
        return right.clone();
    };
    for (key, value) in incoming {
        match entry(&mut merged, key) {
            Some(slot) => {
                let current = std::mem::take(slot);
                *slot = match (current, value) {
                    (current @ Value::Record(_), Value::Record(_)) => merge_two(current, value),
                    (Value::List(mut items), Value::List(extra)) => {
                        items.extend(extra.iter().cloned());
                        Value::List(items)
                    }
                    (_, value) => value.clone(),
                };
            }
            None => merged.push((key.clone(), value.clone())),
        }
    }
    Value::Record(merged)
}
