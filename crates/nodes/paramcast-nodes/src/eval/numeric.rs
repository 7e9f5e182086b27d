//! Operation tables shared by the CALC nodes.

use std::str::FromStr;

use log::{error, warn};

use crate::error::NodeError;

macro_rules! named_ops {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = NodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|op| op.name().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| NodeError::UnknownOperation(s.to_string()))
            }
        }
    };
}

named_ops!(
    /// Single-input operations. Aggregates collapse the vector to one value;
    /// everything else maps over components.
    UnaryOp {
        Abs => "ABS",
        Floor => "FLOOR",
        Ceil => "CEIL",
        Sqrt => "SQRT",
        Square => "SQUARE",
        Log => "LOG",
        Log10 => "LOG10",
        Sin => "SIN",
        Cos => "COS",
        Tan => "TAN",
        Negate => "NEGATE",
        Reciprocal => "RECIPROCAL",
        Factorial => "FACTORIAL",
        Exp => "EXP",
        Minimum => "MINIMUM",
        Maximum => "MAXIMUM",
        Mean => "MEAN",
        Median => "MEDIAN",
        Mode => "MODE",
        Magnitude => "MAGNITUDE",
        Normalize => "NORMALIZE",
        Not => "NOT",
        BitNot => "BIT_NOT",
        CosH => "COS_H",
        SinH => "SIN_H",
        TanH => "TAN_H",
        Radians => "RADIANS",
        Degrees => "DEGREES",
        Gamma => "GAMMA",
        IsEven => "IS_EVEN",
        IsOdd => "IS_ODD",
    }
);

named_ops!(
    /// Two-input operations over equally sized component vectors.
    BinaryOp {
        Add => "ADD",
        Subtract => "SUBTRACT",
        Multiply => "MULTIPLY",
        Divide => "DIVIDE",
        DivideFloor => "DIVIDE_FLOOR",
        Modulus => "MODULUS",
        Power => "POWER",
        Maximum => "MAXIMUM",
        Minimum => "MINIMUM",
        DotProduct => "DOT_PRODUCT",
        CrossProduct => "CROSS_PRODUCT",
        BitAnd => "BIT_AND",
        BitNand => "BIT_NAND",
        BitOr => "BIT_OR",
        BitNor => "BIT_NOR",
        BitXor => "BIT_XOR",
        BitXnor => "BIT_XNOR",
        BitLshift => "BIT_LSHIFT",
        BitRshift => "BIT_RSHIFT",
        Union => "UNION",
        Intersection => "INTERSECTION",
        Difference => "DIFFERENCE",
    }
);

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

/// `170!` is the largest factorial an `f64` holds.
fn factorial(x: f64) -> Option<f64> {
    let n = x.trunc();
    if !(0.0..=170.0).contains(&n) {
        return None;
    }
    Some((1..=n as u64).fold(1.0, |acc, k| acc * k as f64))
}

/// Lanczos approximation (g = 7, n = 9).
fn gamma(x: f64) -> Option<f64> {
    const G: f64 = 7.0;
    const COEF: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x <= 0.0 && x.fract() == 0.0 {
        return None;
    }
    if x < 0.5 {
        let s = (std::f64::consts::PI * x).sin();
        return gamma(1.0 - x).map(|g| std::f64::consts::PI / (s * g));
    }
    let x = x - 1.0;
    let t = x + G + 0.5;
    let series = COEF
        .iter()
        .enumerate()
        .skip(1)
        .fold(COEF[0], |acc, (i, c)| acc + c / (x + i as f64));
    Some((2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series)
}

fn apply_component(op: UnaryOp, x: f64) -> Option<f64> {
    let v = match op {
        UnaryOp::Abs => x.abs(),
        UnaryOp::Floor => x.floor(),
        UnaryOp::Ceil => x.ceil(),
        UnaryOp::Sqrt if x < 0.0 => return None,
        UnaryOp::Sqrt => x.sqrt(),
        UnaryOp::Square => x * x,
        UnaryOp::Log | UnaryOp::Log10 if x <= 0.0 => return None,
        UnaryOp::Log => x.ln(),
        UnaryOp::Log10 => x.log10(),
        UnaryOp::Sin => x.sin(),
        UnaryOp::Cos => x.cos(),
        UnaryOp::Tan => x.tan(),
        UnaryOp::Negate => -x,
        UnaryOp::Reciprocal if x == 0.0 => return None,
        UnaryOp::Reciprocal => 1.0 / x,
        UnaryOp::Factorial => factorial(x)?,
        UnaryOp::Exp => x.exp(),
        UnaryOp::Not => flag(x == 0.0),
        UnaryOp::BitNot => !(x as i64) as f64,
        UnaryOp::CosH => x.cosh(),
        UnaryOp::SinH => x.sinh(),
        UnaryOp::TanH => x.tanh(),
        UnaryOp::Radians => x.to_radians(),
        UnaryOp::Degrees => x.to_degrees(),
        UnaryOp::Gamma => gamma(x)?,
        UnaryOp::IsEven => flag(x.rem_euclid(2.0) == 0.0),
        UnaryOp::IsOdd => flag(x.rem_euclid(2.0) == 1.0),
        UnaryOp::Minimum
        | UnaryOp::Maximum
        | UnaryOp::Mean
        | UnaryOp::Median
        | UnaryOp::Mode
        | UnaryOp::Magnitude
        | UnaryOp::Normalize => x,
    };
    v.is_finite().then_some(v)
}

fn magnitude(val: &[f64]) -> f64 {
    val.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Apply a unary operation. Components whose result is undefined or
/// non-finite become 0.
pub fn unary(op: UnaryOp, val: &[f64]) -> Vec<f64> {
    if val.is_empty() {
        return Vec::new();
    }
    match op {
        UnaryOp::Mean => vec![val.iter().sum::<f64>() / val.len() as f64],
        UnaryOp::Median => {
            let mut sorted = val.to_vec();
            sorted.sort_by(f64::total_cmp);
            vec![sorted[sorted.len() / 2]]
        }
        UnaryOp::Mode => {
            let mut counts: Vec<(f64, usize)> = Vec::new();
            for &x in val {
                match counts.iter_mut().find(|(v, _)| *v == x) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((x, 1)),
                }
            }
            let best = counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
            counts
                .into_iter()
                .find(|(_, n)| *n == best)
                .map(|(v, _)| vec![v])
                .unwrap_or_default()
        }
        UnaryOp::Magnitude => vec![magnitude(val)],
        UnaryOp::Normalize if val.len() == 1 => vec![1.0],
        UnaryOp::Normalize => {
            let m = magnitude(val);
            if m == 0.0 {
                error!("cannot normalize a zero-length vector");
                return vec![0.0; val.len()];
            }
            val.iter().map(|x| x / m).collect()
        }
        UnaryOp::Maximum => vec![val.iter().copied().fold(f64::NEG_INFINITY, f64::max)],
        UnaryOp::Minimum => vec![val.iter().copied().fold(f64::INFINITY, f64::min)],
        _ => val
            .iter()
            .map(|&x| {
                apply_component(op, x).unwrap_or_else(|| {
                    error!("{} undefined for {x}", op.name());
                    0.0
                })
            })
            .collect(),
    }
}

fn shift(a: f64, b: f64, left: bool) -> f64 {
    let (a, b) = (a as i64, b as i64);
    let shifted = u32::try_from(b).ok().and_then(|b| {
        if left {
            a.checked_shl(b)
        } else {
            // arithmetic shift saturates to the sign
            Some(a >> b.min(63))
        }
    });
    match shifted {
        Some(v) => v as f64,
        None => {
            warn!("shift by {b} out of range");
            0.0
        }
    }
}

fn dedup(val: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(val.len());
    for &x in val {
        if !out.contains(&x) {
            out.push(x);
        }
    }
    out
}

/// Apply a binary operation component-wise (or whole-vector for the vector,
/// ordering, and set operations).
pub fn binary(op: BinaryOp, a: &[f64], b: &[f64]) -> Vec<f64> {
    let pairwise = |f: fn(f64, f64) -> f64| -> Vec<f64> {
        a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
    };
    let ints = |f: fn(i64, i64) -> f64| -> Vec<f64> {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| f(x as i64, y as i64))
            .collect()
    };

    match op {
        BinaryOp::Add => pairwise(|x, y| x + y),
        BinaryOp::Subtract => pairwise(|x, y| x - y),
        BinaryOp::Multiply => pairwise(|x, y| x * y),
        BinaryOp::Divide => pairwise(|x, y| if y != 0.0 { x / y } else { 0.0 }),
        BinaryOp::DivideFloor => pairwise(|x, y| if y != 0.0 { (x / y).floor() } else { 0.0 }),
        BinaryOp::Modulus => pairwise(|x, y| if y != 0.0 { floor_mod(x, y) } else { 0.0 }),
        BinaryOp::Power => pairwise(f64::powf),
        BinaryOp::Maximum => {
            if b.partial_cmp(a) == Some(std::cmp::Ordering::Greater) {
                b.to_vec()
            } else {
                a.to_vec()
            }
        }
        BinaryOp::Minimum => {
            if b.partial_cmp(a) == Some(std::cmp::Ordering::Less) {
                b.to_vec()
            } else {
                a.to_vec()
            }
        }
        BinaryOp::DotProduct => vec![a.iter().zip(b).map(|(x, y)| x * y).sum()],
        BinaryOp::CrossProduct => {
            if a.len() < 3 || b.len() < 3 {
                warn!("Cross product only defined for 3D vectors");
                return vec![0.0; 3];
            }
            vec![
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ]
        }
        BinaryOp::BitAnd => ints(|x, y| (x & y) as f64),
        BinaryOp::BitNand => ints(|x, y| flag(x & y == 0)),
        BinaryOp::BitOr => ints(|x, y| (x | y) as f64),
        BinaryOp::BitNor => ints(|x, y| flag(x | y == 0)),
        BinaryOp::BitXor => ints(|x, y| (x ^ y) as f64),
        BinaryOp::BitXnor => ints(|x, y| flag(x ^ y == 0)),
        BinaryOp::BitLshift => a.iter().zip(b).map(|(&x, &y)| shift(x, y, true)).collect(),
        BinaryOp::BitRshift => a.iter().zip(b).map(|(&x, &y)| shift(x, y, false)).collect(),
        BinaryOp::Union => {
            let mut out = dedup(a);
            for x in dedup(b) {
                if !out.contains(&x) {
                    out.push(x);
                }
            }
            out
        }
        BinaryOp::Intersection => dedup(a).into_iter().filter(|x| b.contains(x)).collect(),
        BinaryOp::Difference => dedup(a).into_iter().filter(|x| !b.contains(x)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operation_names() {
        assert_eq!("add".parse::<BinaryOp>().ok(), Some(BinaryOp::Add));
        assert_eq!("IS_ODD".parse::<UnaryOp>().ok(), Some(UnaryOp::IsOdd));
        assert!(matches!("NOPE".parse::<UnaryOp>(), Err(NodeError::UnknownOperation(_))));
    }

    #[test]
    fn undefined_unary_results_become_zero() {
        assert_eq!(unary(UnaryOp::Sqrt, &[4.0, -1.0]), vec![2.0, 0.0]);
        assert_eq!(unary(UnaryOp::Reciprocal, &[0.0, 2.0]), vec![0.0, 0.5]);
        assert_eq!(unary(UnaryOp::Log, &[0.0]), vec![0.0]);
    }

    #[test]
    fn aggregates_collapse() {
        let v = [3.0, 1.0, 3.0, 2.0];
        assert_eq!(unary(UnaryOp::Mean, &v), vec![2.25]);
        assert_eq!(unary(UnaryOp::Median, &v), vec![3.0]);
        assert_eq!(unary(UnaryOp::Mode, &v), vec![3.0]);
        assert_eq!(unary(UnaryOp::Maximum, &v), vec![3.0]);
        assert_eq!(unary(UnaryOp::Magnitude, &[3.0, 4.0]), vec![5.0]);
        assert_eq!(unary(UnaryOp::Normalize, &[3.0, 4.0]), vec![0.6, 0.8]);
        assert_eq!(unary(UnaryOp::Normalize, &[7.0]), vec![1.0]);
    }

    #[test]
    fn factorial_and_gamma_agree() {
        assert_eq!(unary(UnaryOp::Factorial, &[5.0]), vec![120.0]);
        let g = unary(UnaryOp::Gamma, &[5.0])[0];
        assert!((g - 24.0).abs() < 1e-9);
        assert_eq!(unary(UnaryOp::Gamma, &[0.0]), vec![0.0]);
    }

    #[test]
    fn factorial_out_of_range_becomes_zero() {
        assert_eq!(unary(UnaryOp::Factorial, &[1e15, -2.0, f64::NAN]), vec![0.0; 3]);
        assert!(unary(UnaryOp::Factorial, &[170.0])[0].is_finite());
        assert_eq!(unary(UnaryOp::Factorial, &[171.0]), vec![0.0]);
    }

    #[test]
    fn parity_uses_floor_semantics() {
        assert_eq!(unary(UnaryOp::IsOdd, &[-3.0, 4.0]), vec![1.0, 0.0]);
        assert_eq!(unary(UnaryOp::IsEven, &[-4.0]), vec![1.0]);
    }

    #[test]
    fn division_by_zero_yields_zero() {
        assert_eq!(binary(BinaryOp::Divide, &[1.0, 4.0], &[0.0, 2.0]), vec![0.0, 2.0]);
        assert_eq!(binary(BinaryOp::Modulus, &[-3.0], &[2.0]), vec![1.0]);
        assert_eq!(binary(BinaryOp::DivideFloor, &[7.0], &[2.0]), vec![3.0]);
    }

    #[test]
    fn cross_product_needs_three_components() {
        assert_eq!(
            binary(BinaryOp::CrossProduct, &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]),
            vec![0.0, 0.0, 1.0]
        );
        assert_eq!(binary(BinaryOp::CrossProduct, &[1.0], &[2.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn bit_and_set_operations() {
        assert_eq!(binary(BinaryOp::BitAnd, &[6.0], &[3.0]), vec![2.0]);
        assert_eq!(binary(BinaryOp::BitNand, &[6.0], &[1.0]), vec![1.0]);
        assert_eq!(binary(BinaryOp::BitLshift, &[1.0], &[4.0]), vec![16.0]);
        assert_eq!(
            binary(BinaryOp::Union, &[1.0, 2.0, 2.0], &[2.0, 3.0]),
            vec![1.0, 2.0, 3.0]
        );
        assert_eq!(binary(BinaryOp::Intersection, &[1.0, 2.0], &[2.0]), vec![2.0]);
        assert_eq!(binary(BinaryOp::Difference, &[1.0, 2.0], &[2.0]), vec![1.0]);
    }

    #[test]
    fn ordering_compares_whole_vectors() {
        assert_eq!(binary(BinaryOp::Maximum, &[1.0, 9.0], &[2.0, 0.0]), vec![2.0, 0.0]);
        assert_eq!(binary(BinaryOp::Minimum, &[1.0, 9.0], &[2.0, 0.0]), vec![1.0, 9.0]);
    }
}
