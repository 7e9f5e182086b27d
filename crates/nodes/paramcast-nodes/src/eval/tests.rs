//! Behavioural coverage for the node evaluators.

use super::*;
use crate::progress::NullProgress;
use crate::types::ports;
use paramcast_core::kind::UnknownKind;
use paramcast_core::CoreError;

fn inputs(pairs: Vec<(&str, Value)>) -> Inputs {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn run(kind: NodeType, pairs: Vec<(&str, Value)>) -> Result<Vec<Value>, NodeError> {
    run_node(&kind, &inputs(pairs), &mut NullProgress)
}

fn floats(values: &[f64]) -> Value {
    Value::list(values.iter().copied())
}

// --- CALC BINARY ---------------------------------------------------------

#[test]
fn it_should_broadcast_a_scalar_over_a_batch() {
    let mut rows: Vec<usize> = Vec::new();
    let out = run_node(
        &NodeType::CalcBinary,
        &inputs(vec![
            (ports::A, Value::list([1i64, 2])),
            (ports::B, Value::Int(5)),
            (ports::FUNC, Value::from("ADD")),
            (ports::TYPE, Value::from("FLOAT")),
        ]),
        &mut rows,
    )
    .expect("add should evaluate");

    assert_eq!(out, vec![Value::Float(6.0), Value::Float(7.0)]);
    assert_eq!(rows, vec![0, 1]);
}

#[test]
fn it_should_use_component_fallbacks_when_operands_are_missing() {
    let out = run(
        NodeType::CalcBinary,
        vec![
            (ports::X, Value::Float(3.0)),
            (ports::Y, Value::Float(4.0)),
            (ports::FUNC, Value::from("MULTIPLY")),
        ],
    )
    .expect("multiply");
    assert_eq!(out, vec![Value::Float(12.0)]);

    let out = run(
        NodeType::CalcBinary,
        vec![
            (ports::A2, Value::tuple([1i64, 2])),
            (ports::B2, Value::tuple([3i64, 4])),
            (ports::TYPE, Value::from("VEC2")),
        ],
    )
    .expect("vec2 add");
    assert_eq!(out, vec![floats(&[4.0, 6.0])]);
}

#[test]
fn it_should_flip_operands() {
    let out = run(
        NodeType::CalcBinary,
        vec![
            (ports::X, Value::Float(3.0)),
            (ports::Y, Value::Float(4.0)),
            (ports::FUNC, Value::from("SUBTRACT")),
            (ports::FLIP, Value::Bool(true)),
        ],
    )
    .expect("subtract");
    assert_eq!(out, vec![Value::Float(1.0)]);
}

#[test]
fn it_should_cast_binary_results_to_the_requested_type() {
    let out = run(
        NodeType::CalcBinary,
        vec![
            (ports::A2, Value::tuple([7i64, 1])),
            (ports::B2, Value::tuple([2i64, 0])),
            (ports::FUNC, Value::from("DIVIDE")),
            (ports::TYPE, Value::from("VEC2INT")),
        ],
    )
    .expect("divide");
    assert_eq!(out, vec![Value::list([3i64, 0])]);
}

#[test]
fn it_should_compute_cross_products_on_vec3() {
    let out = run(
        NodeType::CalcBinary,
        vec![
            (ports::A, Value::tuple([1i64, 0, 0])),
            (ports::B, Value::tuple([0i64, 1, 0])),
            (ports::FUNC, Value::from("CROSS_PRODUCT")),
            (ports::TYPE, Value::from("VEC3")),
        ],
    )
    .expect("cross");
    assert_eq!(out, vec![floats(&[0.0, 0.0, 1.0])]);
}

#[test]
fn it_should_reject_unknown_operations_and_types() {
    let err = run(
        NodeType::CalcBinary,
        vec![(ports::FUNC, Value::from("NOPE"))],
    )
    .expect_err("unknown op");
    assert_eq!(err, NodeError::UnknownOperation("NOPE".into()));

    let err = run(
        NodeType::CalcBinary,
        vec![(ports::TYPE, Value::from("VEC9"))],
    )
    .expect_err("unknown type");
    assert_eq!(err, NodeError::UnknownKind(UnknownKind("VEC9".into())));
}

// --- CALC UNARY ----------------------------------------------------------

#[test]
fn it_should_apply_unary_ops_per_component() {
    let out = run(
        NodeType::CalcUnary,
        vec![
            (ports::A, Value::tuple([-1.5, 2.0, -3.0, 4.0])),
            (ports::FUNC, Value::from("ABS")),
        ],
    )
    .expect("abs");
    assert_eq!(out, vec![floats(&[1.5, 2.0, 3.0, 4.0])]);
}

#[test]
fn it_should_aggregate_unary_vectors() {
    let out = run(
        NodeType::CalcUnary,
        vec![
            (ports::A, Value::tuple([1i64, 2, 3, 6])),
            (ports::FUNC, Value::from("MEAN")),
        ],
    )
    .expect("mean");
    assert_eq!(out, vec![floats(&[3.0])]);
}

#[test]
fn it_should_emit_float_components_for_int_inputs() {
    let out = run(
        NodeType::CalcUnary,
        vec![(ports::A, Value::Int(-3)), (ports::FUNC, Value::from("ABS"))],
    )
    .expect("abs");
    assert_eq!(out, vec![floats(&[3.0; 4])]);
}

#[test]
fn it_should_default_to_abs_of_zero() {
    let out = run(NodeType::CalcUnary, vec![]).expect("defaults");
    assert_eq!(out, vec![floats(&[0.0; 4])]);
}

#[test]
fn it_should_repeat_the_last_operation_for_longer_batches() {
    let mut rows: Vec<usize> = Vec::new();
    let out = run_node(
        &NodeType::CalcUnary,
        &inputs(vec![
            (ports::A, Value::list([1i64, 2, 3])),
            (ports::FUNC, Value::list(["ABS", "NEGATE"])),
        ]),
        &mut rows,
    )
    .expect("batch");
    assert_eq!(
        out,
        vec![
            floats(&[1.0; 4]),
            floats(&[-2.0; 4]),
            floats(&[-3.0; 4]),
        ]
    );
    assert_eq!(rows, vec![0, 1, 2]);
}

// --- VALUE ---------------------------------------------------------------

#[test]
fn it_should_build_typed_values() {
    let out = run(
        NodeType::Value,
        vec![
            (ports::A, Value::tuple([1.7, 2.2, 3.9, 4.0])),
            (ports::TYPE, Value::from("VEC3INT")),
        ],
    )
    .expect("vec3int");
    assert_eq!(out, vec![Value::list([1i64, 2, 3])]);

    let out = run(
        NodeType::Value,
        vec![(ports::A, Value::tuple([1i64, 0, 0, 0]))],
    )
    .expect("boolean default");
    assert_eq!(out, vec![Value::list([true, false, false, false])]);

    let out = run(
        NodeType::Value,
        vec![
            (ports::A, Value::tuple([1i64, 2, 3, 4])),
            (ports::TYPE, Value::from("STRING")),
        ],
    )
    .expect("string");
    assert_eq!(out, vec![Value::from("1.0, 2.0, 3.0, 4.0")]);
}

// --- LERP ----------------------------------------------------------------

#[test]
fn it_should_lerp_between_defaults() {
    let out = run(NodeType::Lerp, vec![(ports::FLOAT, Value::Float(0.25))]).expect("lerp");
    assert_eq!(out, vec![floats(&[0.25; 4])]);
}

#[test]
fn it_should_clamp_lerp_alpha() {
    let out = run(NodeType::Lerp, vec![(ports::FLOAT, Value::Float(2.0))]).expect("lerp");
    assert_eq!(out, vec![floats(&[1.0; 4])]);
}

#[test]
fn it_should_lerp_to_integers_and_through_eases() {
    let out = run(
        NodeType::Lerp,
        vec![
            (ports::A, Value::tuple([0i64, 10, 20, 30])),
            (ports::B, Value::tuple([10i64, 20, 30, 40])),
            (ports::FLOAT, Value::Float(0.5)),
            (ports::TYPE, Value::from("INT")),
        ],
    )
    .expect("int lerp");
    assert_eq!(out, vec![Value::list([5i64, 15, 25, 35])]);

    let out = run(
        NodeType::Lerp,
        vec![
            (ports::B, Value::tuple([4i64, 4, 4, 4])),
            (ports::FLOAT, Value::Float(0.5)),
            (ports::EASE, Value::from("QUAD_IN")),
        ],
    )
    .expect("eased lerp");
    assert_eq!(out, vec![floats(&[1.0; 4])]);
}

#[test]
fn it_should_reject_unknown_eases() {
    let err = run(NodeType::Lerp, vec![(ports::EASE, Value::from("BOUNCE"))])
        .expect_err("unknown ease");
    assert_eq!(err, NodeError::UnknownEase("BOUNCE".into()));
}

// --- SWAP ----------------------------------------------------------------

#[test]
fn it_should_swizzle_between_vectors_and_constants() {
    let out = run(
        NodeType::Swap,
        vec![
            (ports::A, Value::tuple([1i64, 2, 3, 4])),
            (ports::B, Value::tuple([5i64, 6, 7, 8])),
            (ports::SWAP_X, Value::from("B_Y")),
            (ports::SWAP_Y, Value::from("CONSTANT")),
            (ports::Y, Value::Float(9.0)),
            (ports::SWAP_Z, Value::from("A_Z")),
            (ports::SWAP_W, Value::from("B_W")),
        ],
    )
    .expect("swap");
    assert_eq!(out, vec![floats(&[6.0, 9.0, 3.0, 8.0])]);
}

#[test]
fn it_should_pass_a_through_with_default_selectors() {
    let out = run(
        NodeType::Swap,
        vec![(ports::A, Value::tuple([1i64, 2, 3, 4]))],
    )
    .expect("swap");
    assert_eq!(out, vec![floats(&[1.0, 2.0, 3.0, 4.0])]);

    let err = run(NodeType::Swap, vec![(ports::SWAP_X, Value::from("C_X"))])
        .expect_err("unknown selector");
    assert!(matches!(err, NodeError::UnknownSelector(_)));
}

// --- JSON entry point ----------------------------------------------------

#[test]
fn it_should_reject_non_object_json_inputs() {
    let err = run_node_json(
        &NodeType::Value,
        serde_json::json!([1, 2]),
        &mut NullProgress,
    )
    .expect_err("array inputs");
    assert!(matches!(err, NodeError::Core(CoreError::Json(_))));
}
