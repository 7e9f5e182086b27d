//! Evaluation of individual node invocations.
//!
//! - [`eval_node`] houses the dispatch and the per-node row loops.
//! - [`numeric`] holds the CALC operation tables.
//! - [`ease`] provides the LERP easing curves.
//!
//! Every node follows the same pipeline: normalize each named input with
//! [`parse_parameter`](paramcast_core::parse_parameter), broadcast the
//! sequences with [`zip_longest_fill`](paramcast_core::zip_longest_fill), then
//! compute one result per row and report the row to the progress sink.

use paramcast_core::json::inputs_from_json;
use paramcast_core::{Inputs, Value};
use serde_json::Value as JsonValue;

use crate::error::NodeError;
use crate::progress::Progress;
use crate::types::NodeType;

pub mod ease;
pub mod eval_node;
pub mod numeric;

pub use eval_node::eval_node;

#[cfg(test)]
mod tests;

/// Run `kind` over `inputs`, returning one value per broadcast row.
pub fn run_node(
    kind: &NodeType,
    inputs: &Inputs,
    progress: &mut dyn Progress,
) -> Result<Vec<Value>, NodeError> {
    eval_node(*kind, inputs, progress)
}

/// Like [`run_node`], with inputs given as a JSON object keyed by input name.
pub fn run_node_json(
    kind: &NodeType,
    inputs: JsonValue,
    progress: &mut dyn Progress,
) -> Result<Vec<Value>, NodeError> {
    let inputs = inputs_from_json(inputs)?;
    run_node(kind, &inputs, progress)
}
