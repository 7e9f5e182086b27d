use log::debug;
use paramcast_core::kind::UnknownKind;
use paramcast_core::{
    parse_parameter, parse_value, vector_swap, zip_longest_fill, CoerceOptions, Inputs, Swizzle,
    Value, ValueKind,
};

use super::ease::Ease;
use super::numeric::{self, BinaryOp, UnaryOp};
use crate::error::NodeError;
use crate::progress::Progress;
use crate::types::{ports, NodeType};

/// Evaluate one node invocation over its whole input batch.
///
/// Every input is normalized into a per-element sequence, the sequences are
/// broadcast to the longest one, and each row yields exactly one output value.
pub fn eval_node(
    kind: NodeType,
    inputs: &Inputs,
    progress: &mut dyn Progress,
) -> Result<Vec<Value>, NodeError> {
    debug!("evaluating {kind:?} with {} inputs", inputs.len());
    match kind {
        NodeType::CalcUnary => eval_calc_unary(inputs, progress),
        NodeType::CalcBinary => eval_calc_binary(inputs, progress),
        NodeType::Value => eval_value(inputs, progress),
        NodeType::Lerp => eval_lerp(inputs, progress),
        NodeType::Swap => eval_swap(inputs, progress),
    }
}

fn param(inputs: &Inputs, key: &str, default: impl Into<Value>, kind: ValueKind) -> Vec<Value> {
    parse_parameter(key, inputs, &default.into(), kind, &CoerceOptions::default())
}

fn text(v: &Value) -> &str {
    v.as_str().unwrap_or_default()
}

fn zero4() -> Value {
    Value::tuple([0i64; 4])
}

fn eval_calc_unary(inputs: &Inputs, progress: &mut dyn Progress) -> Result<Vec<Value>, NodeError> {
    let a = param(inputs, ports::A, 0i64, ValueKind::Vec4);
    let func = param(inputs, ports::FUNC, UnaryOp::Abs.name(), ValueKind::String);

    let mut results = Vec::new();
    for row in zip_longest_fill(vec![a, func]) {
        let op: UnaryOp = text(&row[1]).parse()?;
        let a = &row[0];
        let comps = parse_value(a, ValueKind::infer(a), &Value::Int(0), &CoerceOptions::default())
            .as_components();
        // A is already a VEC4, so components are floats even for int inputs
        results.push(Value::list(numeric::unary(op, &comps)));
        progress.advance(row.index);
    }
    Ok(results)
}

fn eval_calc_binary(inputs: &Inputs, progress: &mut dyn Progress) -> Result<Vec<Value>, NodeError> {
    let opts = CoerceOptions::default();
    let sequences = vec![
        param(inputs, ports::A, Value::None, ValueKind::Any),
        param(inputs, ports::B, Value::None, ValueKind::Any),
        param(inputs, ports::X, 0i64, ValueKind::Float),
        param(inputs, ports::A2, Value::tuple([0i64; 2]), ValueKind::Vec2),
        param(inputs, ports::A3, Value::tuple([0i64; 3]), ValueKind::Vec3),
        param(inputs, ports::A4, zero4(), ValueKind::Vec4),
        param(inputs, ports::Y, 0i64, ValueKind::Float),
        param(inputs, ports::B2, Value::tuple([0i64; 2]), ValueKind::Vec2),
        param(inputs, ports::B3, Value::tuple([0i64; 3]), ValueKind::Vec3),
        param(inputs, ports::B4, zero4(), ValueKind::Vec4),
        param(inputs, ports::FUNC, BinaryOp::Add.name(), ValueKind::String),
        param(inputs, ports::TYPE, ValueKind::Float.name(), ValueKind::String),
        param(inputs, ports::FLIP, false, ValueKind::Boolean),
    ];

    let mut results = Vec::new();
    for row in zip_longest_fill(sequences) {
        let op: BinaryOp = text(&row[10]).parse()?;
        let typ: ValueKind = text(&row[11]).parse()?;

        // offsets of the A/B fallbacks that match the output width
        let (fa, fb) = match typ.component_count() {
            2 => (3, 7),
            3 => (4, 8),
            4 => (5, 9),
            _ => (2, 6),
        };
        let operand = |primary: &Value, fallback: &Value| {
            let source = if primary.is_none() { fallback } else { primary };
            parse_value(source, ValueKind::Vec4, source, &opts).as_components()
        };
        let mut val_a = operand(&row[0], &row[fa]);
        let mut val_b = operand(&row[1], &row[fb]);
        if row[12].is_truthy() {
            std::mem::swap(&mut val_a, &mut val_b);
        }

        let size = typ.component_count().max(1);
        val_a.truncate(size);
        val_b.truncate(size);

        let val = Value::list(numeric::binary(op, &val_a, &val_b));
        let out = match parse_value(&val, typ, &val, &opts) {
            Value::List(items) if items.is_empty() => Value::Int(0),
            other => other,
        };
        results.push(out);
        progress.advance(row.index);
    }
    Ok(results)
}

fn eval_value(inputs: &Inputs, progress: &mut dyn Progress) -> Result<Vec<Value>, NodeError> {
    let sequences = vec![
        param(inputs, ports::A, 0i64, ValueKind::Vec4),
        param(inputs, ports::TYPE, ValueKind::Boolean.name(), ValueKind::String),
        param(inputs, ports::X, 0i64, ValueKind::Float),
        param(inputs, ports::Y, 0i64, ValueKind::Float),
        param(inputs, ports::Z, 0i64, ValueKind::Float),
        param(inputs, ports::W, 0i64, ValueKind::Float),
    ];

    let mut results = Vec::new();
    for row in zip_longest_fill(sequences) {
        let typ: ValueKind = text(&row[1]).parse()?;
        let fill = Value::Tuple(row.values[2..6].to_vec());
        results.push(parse_value(&row[0], typ, &fill, &CoerceOptions::default()));
        progress.advance(row.index);
    }
    Ok(results)
}

fn eval_lerp(inputs: &Inputs, progress: &mut dyn Progress) -> Result<Vec<Value>, NodeError> {
    let opts = CoerceOptions::default();
    let alpha_opts = CoerceOptions::new().clamp(0.0, 1.0);
    let sequences = vec![
        param(inputs, ports::A, 0i64, ValueKind::Vec4),
        param(inputs, ports::B, 1i64, ValueKind::Vec4),
        parse_parameter(ports::FLOAT, inputs, &Value::Int(0), ValueKind::Float, &alpha_opts),
        param(inputs, ports::EASE, Ease::None.name(), ValueKind::String),
        param(inputs, ports::TYPE, ValueKind::Float.name(), ValueKind::String),
    ];

    let mut results = Vec::new();
    for row in zip_longest_fill(sequences) {
        let ease: Ease = text(&row[3]).parse()?;
        let integral = match text(&row[4]).parse::<ValueKind>()? {
            ValueKind::Int => true,
            ValueKind::Float => false,
            other => return Err(UnknownKind(other.name().to_string()).into()),
        };

        // interpolate over the widest stride the two endpoints share
        let width = row[0]
            .as_components()
            .len()
            .max(row[1].as_components().len())
            .clamp(1, 4);
        let stride = [
            ValueKind::Float,
            ValueKind::Vec2,
            ValueKind::Vec3,
            ValueKind::Vec4,
        ][width - 1];
        let a = parse_value(&row[0], stride, &row[0], &opts).as_components();
        let b = parse_value(&row[1], stride, &row[1], &opts).as_components();
        let alpha = parse_value(&row[2], stride, &row[2], &opts).as_components();

        let out = (0..width).map(|i| {
            let v = ease.interpolate(a[i], b[i], alpha[i]);
            if integral {
                Value::Int(v as i64)
            } else {
                Value::Float(v)
            }
        });
        results.push(Value::list(out));
        progress.advance(row.index);
    }
    Ok(results)
}

fn eval_swap(inputs: &Inputs, progress: &mut dyn Progress) -> Result<Vec<Value>, NodeError> {
    let sequences = vec![
        param(inputs, ports::A, zero4(), ValueKind::Vec4),
        param(inputs, ports::B, zero4(), ValueKind::Vec4),
        param(inputs, ports::SWAP_X, Swizzle::AX.name(), ValueKind::String),
        param(inputs, ports::SWAP_Y, Swizzle::AY.name(), ValueKind::String),
        param(inputs, ports::SWAP_Z, Swizzle::AZ.name(), ValueKind::String),
        param(inputs, ports::SWAP_W, Swizzle::AW.name(), ValueKind::String),
        param(inputs, ports::X, 0i64, ValueKind::Float),
        param(inputs, ports::Y, 0i64, ValueKind::Float),
        param(inputs, ports::Z, 0i64, ValueKind::Float),
        param(inputs, ports::W, 0i64, ValueKind::Float),
    ];

    let mut results = Vec::new();
    for row in zip_longest_fill(sequences) {
        let selectors = [
            text(&row[2]).parse::<Swizzle>()?,
            text(&row[3]).parse::<Swizzle>()?,
            text(&row[4]).parse::<Swizzle>()?,
            text(&row[5]).parse::<Swizzle>()?,
        ];
        let constants = [6, 7, 8, 9].map(|i| row[i].as_f64().unwrap_or(0.0));
        let out = vector_swap(&row[0].as_vec4(), &row[1].as_vec4(), selectors, constants);
        results.push(Value::list(out));
        progress.advance(row.index);
    }
    Ok(results)
}
