use serde::{Deserialize, Serialize};

/// The node kinds this crate can evaluate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// One-input math over a 4-vector (`A`, `FUNC`).
    CalcUnary,
    /// Two-input math (`A`, `B`, `FUNC`, `TYPE`, `FLIP` plus component fallbacks).
    CalcBinary,
    /// Build a typed value from `A` or the `X`..`W` components.
    Value,
    /// Eased interpolation between `A` and `B` by `FLOAT`.
    Lerp,
    /// Rebuild a 4-vector component by component from `A`, `B` or constants.
    Swap,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        NodeType::CalcUnary,
        NodeType::CalcBinary,
        NodeType::Value,
        NodeType::Lerp,
        NodeType::Swap,
    ];
}

/// Input names shared by the host and the node evaluators.
pub mod ports {
    pub const A: &str = "A";
    pub const B: &str = "B";
    pub const FUNC: &str = "FUNC";
    pub const TYPE: &str = "TYPE";
    pub const FLIP: &str = "FLIP";
    pub const EASE: &str = "EASE";
    pub const FLOAT: &str = "FLOAT";

    pub const X: &str = "X";
    pub const Y: &str = "Y";
    pub const Z: &str = "Z";
    pub const W: &str = "W";

    // Binary fallbacks for 2, 3 and 4 component types; 1 uses X and Y.
    pub const A2: &str = "A2";
    pub const A3: &str = "A3";
    pub const A4: &str = "A4";
    pub const B2: &str = "B2";
    pub const B3: &str = "B3";
    pub const B4: &str = "B4";

    pub const SWAP_X: &str = "SWAP_X";
    pub const SWAP_Y: &str = "SWAP_Y";
    pub const SWAP_Z: &str = "SWAP_Z";
    pub const SWAP_W: &str = "SWAP_W";
}
