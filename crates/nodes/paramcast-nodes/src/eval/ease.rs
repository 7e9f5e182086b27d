use std::f64::consts::PI;
use std::str::FromStr;

use crate::error::NodeError;

/// Easing curves for the LERP node. `None` is plain linear interpolation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Ease {
    #[default]
    None,
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SinIn,
    SinOut,
    SinInOut,
}

impl Ease {
    pub const ALL: [Ease; 11] = [
        Ease::None,
        Ease::Linear,
        Ease::QuadIn,
        Ease::QuadOut,
        Ease::QuadInOut,
        Ease::CubicIn,
        Ease::CubicOut,
        Ease::CubicInOut,
        Ease::SinIn,
        Ease::SinOut,
        Ease::SinInOut,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Ease::None => "NONE",
            Ease::Linear => "LINEAR",
            Ease::QuadIn => "QUAD_IN",
            Ease::QuadOut => "QUAD_OUT",
            Ease::QuadInOut => "QUAD_IN_OUT",
            Ease::CubicIn => "CUBIC_IN",
            Ease::CubicOut => "CUBIC_OUT",
            Ease::CubicInOut => "CUBIC_IN_OUT",
            Ease::SinIn => "SIN_IN",
            Ease::SinOut => "SIN_OUT",
            Ease::SinInOut => "SIN_IN_OUT",
        }
    }

    /// Map `t` in `[0, 1]` onto the curve.
    pub fn curve(self, t: f64) -> f64 {
        match self {
            Ease::None | Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Ease::SinIn => 1.0 - (t * PI / 2.0).cos(),
            Ease::SinOut => (t * PI / 2.0).sin(),
            Ease::SinInOut => -0.5 * ((PI * t).cos() - 1.0),
        }
    }

    pub fn interpolate(self, a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * self.curve(t)
    }
}

impl FromStr for Ease {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Ease::ALL
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| NodeError::UnknownEase(s.to_string()))
    }
}
