//! Coercion target kinds.
//!
//! Each kind carries its shape (component count) and numeric flavour as
//! explicit methods. The numeric codes survive only so the upper-case schema
//! names and codes used by the host's node definitions round-trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    Boolean,
    Float,
    Int,
    Vec2,
    #[serde(rename = "VEC2INT")]
    Vec2Int,
    Vec3,
    #[serde(rename = "VEC3INT")]
    Vec3Int,
    Vec4,
    #[serde(rename = "VEC4INT")]
    Vec4Int,
    String,
    List,
    Dict,
    Image,
    Latent,
    Any,
}

impl ValueKind {
    pub const ALL: [ValueKind; 15] = [
        ValueKind::Boolean,
        ValueKind::Float,
        ValueKind::Int,
        ValueKind::Vec2,
        ValueKind::Vec2Int,
        ValueKind::Vec3,
        ValueKind::Vec3Int,
        ValueKind::Vec4,
        ValueKind::Vec4Int,
        ValueKind::String,
        ValueKind::List,
        ValueKind::Dict,
        ValueKind::Image,
        ValueKind::Latent,
        ValueKind::Any,
    ];

    /// Host schema code.
    pub const fn code(self) -> u8 {
        match self {
            ValueKind::Boolean => 1,
            ValueKind::Float => 10,
            ValueKind::Int => 12,
            ValueKind::Vec2 => 20,
            ValueKind::Vec2Int => 25,
            ValueKind::Vec3 => 30,
            ValueKind::Vec3Int => 35,
            ValueKind::Vec4 => 40,
            ValueKind::Vec4Int => 45,
            ValueKind::String => 0,
            ValueKind::List => 2,
            ValueKind::Dict => 3,
            ValueKind::Image => 4,
            ValueKind::Latent => 5,
            ValueKind::Any => 9,
        }
    }

    pub fn from_code(code: u8) -> Option<ValueKind> {
        ValueKind::ALL.into_iter().find(|k| k.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Float => "FLOAT",
            ValueKind::Int => "INT",
            ValueKind::Vec2 => "VEC2",
            ValueKind::Vec2Int => "VEC2INT",
            ValueKind::Vec3 => "VEC3",
            ValueKind::Vec3Int => "VEC3INT",
            ValueKind::Vec4 => "VEC4",
            ValueKind::Vec4Int => "VEC4INT",
            ValueKind::String => "STRING",
            ValueKind::List => "LIST",
            ValueKind::Dict => "DICT",
            ValueKind::Image => "IMAGE",
            ValueKind::Latent => "LATENT",
            ValueKind::Any => "ANY",
        }
    }

    /// Slots a coercion must fill: 1 for scalars, 2/3/4 for vectors and 0
    /// for the variable-shape kinds.
    pub const fn component_count(self) -> usize {
        match self {
            ValueKind::Boolean | ValueKind::Float | ValueKind::Int => 1,
            ValueKind::Vec2 | ValueKind::Vec2Int => 2,
            ValueKind::Vec3 | ValueKind::Vec3Int => 3,
            ValueKind::Vec4 | ValueKind::Vec4Int => 4,
            ValueKind::String
            | ValueKind::List
            | ValueKind::Dict
            | ValueKind::Image
            | ValueKind::Latent
            | ValueKind::Any => 0,
        }
    }

    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            ValueKind::Int | ValueKind::Vec2Int | ValueKind::Vec3Int | ValueKind::Vec4Int
        )
    }

    pub const fn is_floating(self) -> bool {
        matches!(
            self,
            ValueKind::Float | ValueKind::Vec2 | ValueKind::Vec3 | ValueKind::Vec4
        )
    }

    pub const fn is_vector(self) -> bool {
        self.component_count() > 1
    }

    pub const fn is_numeric(self) -> bool {
        self.is_integral() || self.is_floating()
    }

    /// Kinds that hand tensors through without materializing them.
    pub const fn keeps_tensors(self) -> bool {
        matches!(self, ValueKind::Image | ValueKind::Latent | ValueKind::Any)
    }

    /// Natural coercion target for an opaque value.
    pub fn infer(value: &Value) -> ValueKind {
        match value {
            Value::None => ValueKind::Any,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::String,
            Value::List(items) | Value::Tuple(items) => u8::try_from(items.len() * 10)
                .ok()
                .and_then(ValueKind::from_code)
                .unwrap_or(ValueKind::Any),
            Value::Record(_) => ValueKind::Dict,
            Value::Tensor(_) => ValueKind::Image,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for ValueKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ValueKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_counts_follow_codes() {
        for kind in ValueKind::ALL {
            if kind.is_numeric() || kind == ValueKind::Boolean {
                assert_eq!(kind.component_count(), (kind.code() as usize / 10).max(1));
            }
        }
        assert_eq!(ValueKind::Vec3Int.component_count(), 3);
        assert_eq!(ValueKind::Dict.component_count(), 0);
    }

    #[test]
    fn names_round_trip() {
        for kind in ValueKind::ALL {
            assert_eq!(kind.name().parse::<ValueKind>(), Ok(kind));
        }
        assert!("VEC5".parse::<ValueKind>().is_err());
        let json = serde_json::to_string(&ValueKind::Vec2Int).expect("serialize");
        assert_eq!(json, "\"VEC2INT\"");
    }

    #[test]
    fn infer_picks_natural_kind() {
        assert_eq!(ValueKind::infer(&Value::Int(3)), ValueKind::Int);
        assert_eq!(ValueKind::infer(&Value::list([1.0, 2.0, 3.0])), ValueKind::Vec3);
        assert_eq!(ValueKind::infer(&Value::list([1.0; 5])), ValueKind::Any);
        assert_eq!(ValueKind::infer(&Value::record([("a", Value::Int(1))])), ValueKind::Dict);
    }
}
