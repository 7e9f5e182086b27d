pub mod cache;
pub mod error;
pub mod eval;
pub mod progress;
pub mod types;

pub use cache::{get_or_load, MemoryCache, ResourceCache};
pub use error::NodeError;
pub use eval::ease::Ease;
pub use eval::numeric::{BinaryOp, UnaryOp};
pub use eval::{eval_node, run_node, run_node_json};
pub use progress::{NullProgress, Progress};
pub use types::{ports, NodeType};
