use log::warn;
use serde_json::{json, Map, Value as JsonValue};

use crate::normalize::Inputs;
use crate::{CoreError, Tensor, Value};

/// Convert host JSON into a [`Value`].
///
/// Plain JSON maps onto the obvious variants (integral numbers become `Int`,
/// arrays become batches). Two object shorthands carry the variants JSON has
/// no literal for: `{ "tuple": [...] }` and
/// `{ "tensor": { "shape": [...], "data": [...] } }`. Any other object is a
/// record, with key order preserved. A tensor whose shape does not match
/// its data becomes `None`.
pub fn value_from_json(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::None,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        JsonValue::String(s) => Value::Text(s),
        JsonValue::Array(items) => Value::List(items.into_iter().map(value_from_json).collect()),
        JsonValue::Object(obj) => {
            if obj.len() == 1 {
                if let Some(JsonValue::Array(items)) = obj.get("tuple") {
                    return Value::Tuple(items.iter().cloned().map(value_from_json).collect());
                }
                if let Some(tensor) = obj.get("tensor").and_then(tensor_from_json) {
                    if tensor.is_well_formed() {
                        return Value::Tensor(tensor);
                    }
                    warn!(
                        "tensor shape {:?} does not describe {} values; treating it as missing",
                        tensor.shape,
                        tensor.data.len()
                    );
                    return Value::None;
                }
            }
            let pairs = obj
                .into_iter()
                .map(|(k, v)| (k, value_from_json(v)))
                .collect();
            Value::Record(pairs)
        }
    }
}

fn tensor_from_json(value: &JsonValue) -> Option<Tensor> {
    let shape = value
        .get("shape")?
        .as_array()?
        .iter()
        .map(|d| d.as_u64().and_then(|d| usize::try_from(d).ok()))
        .collect::<Option<Vec<_>>>()?;
    let data = value
        .get("data")?
        .as_array()?
        .iter()
        .map(JsonValue::as_f64)
        .collect::<Option<Vec<_>>>()?;
    Some(Tensor::new(shape, data))
}

/// Inverse of [`value_from_json`].
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::None => JsonValue::Null,
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        // non-finite floats have no JSON literal and serialize as null
        Value::Float(f) => json!(f),
        Value::Text(s) => json!(s),
        Value::List(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
        Value::Tuple(items) => {
            json!({ "tuple": items.iter().map(value_to_json).collect::<Vec<_>>() })
        }
        Value::Record(pairs) => {
            let mut obj = Map::new();
            for (k, v) in pairs {
                obj.insert(k.clone(), value_to_json(v));
            }
            JsonValue::Object(obj)
        }
        Value::Tensor(t) => json!({ "tensor": { "shape": t.shape, "data": t.data } }),
    }
}

/// Parse the keyword inputs of one node invocation. The top level must be an
/// object keyed by input name.
pub fn inputs_from_json(value: JsonValue) -> Result<Inputs, CoreError> {
    match value {
        JsonValue::Object(obj) => Ok(obj
            .into_iter()
            .map(|(k, v)| (k, value_from_json(v)))
            .collect()),
        other => Err(CoreError::Json(format!(
            "expected an object of named inputs, got {other}"
        ))),
    }
}

/// Parse keyword inputs from a JSON string.
pub fn inputs_from_str(text: &str) -> Result<Inputs, CoreError> {
    let value: JsonValue =
        serde_json::from_str(text).map_err(|e| CoreError::Json(e.to_string()))?;
    inputs_from_json(value)
}
