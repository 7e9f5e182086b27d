//! Per-component vector rebuild from two sources or constants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Swizzle {
    #[serde(rename = "A_X")]
    AX,
    #[serde(rename = "A_Y")]
    AY,
    #[serde(rename = "A_Z")]
    AZ,
    #[serde(rename = "A_W")]
    AW,
    #[serde(rename = "B_X")]
    BX,
    #[serde(rename = "B_Y")]
    BY,
    #[serde(rename = "B_Z")]
    BZ,
    #[serde(rename = "B_W")]
    BW,
    #[serde(rename = "CONSTANT")]
    Constant,
}

/// Which vector a selector reads from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    A,
    B,
}

impl Swizzle {
    pub const ALL: [Swizzle; 9] = [
        Swizzle::AX,
        Swizzle::AY,
        Swizzle::AZ,
        Swizzle::AW,
        Swizzle::BX,
        Swizzle::BY,
        Swizzle::BZ,
        Swizzle::BW,
        Swizzle::Constant,
    ];

    /// Host schema code; the component index is `code / 10`.
    pub const fn code(self) -> u8 {
        match self {
            Swizzle::AX => 0,
            Swizzle::AY => 10,
            Swizzle::AZ => 20,
            Swizzle::AW => 30,
            Swizzle::BX => 9,
            Swizzle::BY => 11,
            Swizzle::BZ => 21,
            Swizzle::BW => 31,
            Swizzle::Constant => 40,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Swizzle::AX => "A_X",
            Swizzle::AY => "A_Y",
            Swizzle::AZ => "A_Z",
            Swizzle::AW => "A_W",
            Swizzle::BX => "B_X",
            Swizzle::BY => "B_Y",
            Swizzle::BZ => "B_Z",
            Swizzle::BW => "B_W",
            Swizzle::Constant => "CONSTANT",
        }
    }

    /// Source vector and component index, or `None` for a constant.
    pub const fn component(self) -> Option<(Source, usize)> {
        let source = match self {
            Swizzle::Constant => return None,
            Swizzle::AX | Swizzle::AY | Swizzle::AZ | Swizzle::AW => Source::A,
            Swizzle::BX | Swizzle::BY | Swizzle::BZ | Swizzle::BW => Source::B,
        };
        Some((source, (self.code() / 10) as usize))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown swizzle selector '{0}'")]
pub struct UnknownSwizzle(pub String);

impl FromStr for Swizzle {
    type Err = UnknownSwizzle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Swizzle::ALL
            .into_iter()
            .find(|sw| sw.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSwizzle(s.to_string()))
    }
}

/// Build a vector whose component `k` is chosen by `selectors[k]`.
pub fn vector_swap<T: Clone>(
    a: &[T; 4],
    b: &[T; 4],
    selectors: [Swizzle; 4],
    constants: [T; 4],
) -> [T; 4] {
    let mut out = constants;
    for (slot, sel) in out.iter_mut().zip(selectors) {
        match sel.component() {
            Some((Source::A, j)) => *slot = a[j].clone(),
            Some((Source::B, j)) => *slot = b[j].clone(),
            None => {}
        }
    }
    out
}
