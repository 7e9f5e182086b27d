//! Per-call coercion options.

use serde::{Deserialize, Serialize};

/// Clamp bounds and the zero-substitute applied to every numeric component.
/// The default clamps nothing and substitutes 0 for 0, which is inert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoerceOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_max: Option<f64>,
    /// Replaces any component that ends up exactly zero.
    #[serde(default)]
    pub zero: f64,
}

impl CoerceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clamp(mut self, min: f64, max: f64) -> Self {
        self.clip_min = Some(min);
        self.clip_max = Some(max);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.clip_min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.clip_max = Some(max);
        self
    }

    pub fn with_zero(mut self, zero: f64) -> Self {
        self.zero = zero;
        self
    }

    pub fn clamp_value(&self, mut v: f64) -> f64 {
        if let Some(lo) = self.clip_min {
            v = v.max(lo);
        }
        if let Some(hi) = self.clip_max {
            v = v.min(hi);
        }
        v
    }

    pub fn substitute_zero(&self, v: f64) -> f64 {
        if v == 0.0 {
            self.zero
        } else {
            v
        }
    }
}
