//! paramcast-core: value coercion and parameter broadcasting for graph node plugins.
//!
//! Every node funnels its raw keyword inputs through this crate before doing
//! any work: [`parse_parameter`] turns a named input into one coerced value per
//! batch element, [`zip_longest_fill`] aligns those batches into rows, and
//! [`vector_swap`] rebuilds vectors component by component. All functions are
//! pure; nothing here holds state between calls.

pub mod broadcast;
pub mod coercion;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod grid;
pub mod json;
pub mod kind;
pub mod normalize;
pub mod record;
pub mod swizzle;
pub mod value;

pub use broadcast::{broadcast_values, zip_longest_fill, BroadcastRow, ZipLongestFill};
pub use coercion::parse_value;
pub use config::CoerceOptions;
pub use dynamic::parse_dynamic;
pub use error::CoreError;
pub use grid::grid_make;
pub use kind::ValueKind;
pub use normalize::{parse_parameter, Inputs};
pub use record::{deep_merge, update_nested};
pub use swizzle::{vector_swap, Swizzle};
pub use value::{Tensor, Value};
