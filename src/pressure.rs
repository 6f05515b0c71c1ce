//! Pressure response curve: a cubic polynomial over normalized stylus
//! pressure, with the compact 64-bit code the driver and presets use.

use std::fmt;
use std::str::FromStr;

/// Coefficients are stored scaled by this factor (100 means 1.00).
pub const COEF_SCALE: f64 = 100.0;

/// Pack four signed 16-bit coefficients into one 64-bit code.
///
/// Coefficient `i` occupies bits `[16*i, 16*i + 16)`, so `a` (the constant
/// term) lands in the lowest 16 bits.
pub const fn serialize(a: i16, b: i16, c: i16, d: i16) -> u64 {
    (a as u16 as u64)
        | ((b as u16 as u64) << 16)
        | ((c as u16 as u64) << 32)
        | ((d as u16 as u64) << 48)
}

/// Unpack a 64-bit code into its four coefficients. Every code decodes.
pub const fn deserialize(code: u64) -> [i16; 4] {
    [
        (code & 0xffff) as u16 as i16,
        ((code >> 16) & 0xffff) as u16 as i16,
        ((code >> 32) & 0xffff) as u16 as i16,
        ((code >> 48) & 0xffff) as u16 as i16,
    ]
}

/// Output range of a device's pressure axis, `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureRange {
    pub max: u32,
}

impl PressureRange {
    pub const fn new(max: u32) -> Self {
        Self { max }
    }
}

/// Cubic pressure curve. Index 0 is the constant term, index 3 the cubic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureCurve {
    coefs: [i16; 4],
}

impl Default for PressureCurve {
    fn default() -> Self {
        Self::from_code(LINEAR)
    }
}

impl PressureCurve {
    pub const fn from_coefficients(coefs: [i16; 4]) -> Self {
        Self { coefs }
    }

    pub const fn from_code(code: u64) -> Self {
        Self {
            coefs: deserialize(code),
        }
    }

    pub fn set_from_coefficients(&mut self, coefs: [i16; 4]) {
        self.coefs = coefs;
    }

    pub fn coefficients(&self) -> [i16; 4] {
        self.coefs
    }

    pub fn code(&self) -> u64 {
        let [a, b, c, d] = self.coefs;
        serialize(a, b, c, d)
    }

    /// Polynomial value at `x` without scaling or clamping (1.0 = full scale).
    pub fn normalized(&self, x: f64) -> f64 {
        self.coefs
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + f64::from(c) / COEF_SCALE)
    }

    /// Map normalized raw pressure to device output, saturating to `range`.
    ///
    /// Input outside `[0, 1]` is clamped first.
    pub fn evaluate(&self, x: f64, range: PressureRange) -> u32 {
        let max = f64::from(range.max);
        let scaled = self.normalized(x.clamp(0.0, 1.0)) * max;
        if scaled.is_nan() {
            return 0;
        }
        scaled.round().clamp(0.0, max) as u32
    }

    /// `steps + 1` evenly spaced `(x, output)` points across `[0, 1]`.
    pub fn sample(&self, steps: usize, range: PressureRange) -> Vec<(f64, u32)> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let x = i as f64 / steps as f64;
                (x, self.evaluate(x, range))
            })
            .collect()
    }

    /// Whether the coefficients sum to 1.00, i.e. full input gives full output.
    pub fn saturates_at_full_scale(&self) -> bool {
        self.coefs.iter().map(|&c| i32::from(c)).sum::<i32>() == COEF_SCALE as i32
    }
}

impl fmt::Display for PressureCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.coefs;
        write!(f, "{},{},{},{}", a, b, c, d)
    }
}

impl FromStr for PressureCurve {
    type Err = String;

    /// Parses `a,b,c,d` (scaled by 100), e.g. `0,200,-100,0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!(
                "Invalid pressure coefficients '{}'. Expected four comma-separated integers",
                s
            ));
        }

        let mut coefs = [0i16; 4];
        for (slot, part) in coefs.iter_mut().zip(parts) {
            *slot = part
                .parse()
                .map_err(|e| format!("Invalid coefficient '{}': {}", part, e))?;
        }
        Ok(Self::from_coefficients(coefs))
    }
}

pub const LINEAR: u64 = serialize(0, 100, 0, 0);
pub const QUADRATIC_1: u64 = serialize(0, 0, 100, 0);
pub const QUADRATIC_2: u64 = serialize(0, 200, -100, 0);
pub const CUBIC_1: u64 = serialize(0, 0, 0, 100);
pub const CUBIC_2: u64 = serialize(0, 100, 100, -100);
pub const LINEAR_SOFT_TOUCH: u64 = serialize(0, 133, 0, 0);
pub const CONSTANT_FULL: u64 = serialize(100, 0, 0, 0);

/// A named pressure curve offered to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Short name used on the command line and in config files.
    pub key: &'static str,
    pub label: &'static str,
    pub code: u64,
}

impl Preset {
    pub fn curve(&self) -> PressureCurve {
        PressureCurve::from_code(self.code)
    }
}

pub const PRESETS: [Preset; 7] = [
    Preset { key: "linear", label: "Linear (default)", code: LINEAR },
    Preset { key: "quadratic-1", label: "Quadratic 1", code: QUADRATIC_1 },
    Preset { key: "quadratic-2", label: "Quadratic 2", code: QUADRATIC_2 },
    Preset { key: "cubic-1", label: "Cubic 1", code: CUBIC_1 },
    Preset { key: "cubic-2", label: "Cubic 2", code: CUBIC_2 },
    Preset { key: "soft-touch", label: "Linear soft touch", code: LINEAR_SOFT_TOUCH },
    Preset { key: "constant", label: "Constant full pressure", code: CONSTANT_FULL },
];

pub fn preset_by_key(key: &str) -> Option<&'static Preset> {
    let key = key.to_lowercase();
    PRESETS.iter().find(|p| p.key == key)
}

/// The preset whose code matches exactly, if any.
pub fn preset_for_code(code: u64) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: PressureRange = PressureRange::new(1000);

    #[test]
    fn test_round_trip_extremes() {
        let tuples = [
            [0, 0, 0, 0],
            [i16::MIN, i16::MAX, -1, 1],
            [-1, -1, -1, -1],
            [32767, -32768, 32767, -32768],
            [0, 200, -100, 0],
        ];
        for [a, b, c, d] in tuples {
            assert_eq!(deserialize(serialize(a, b, c, d)), [a, b, c, d]);
        }
    }

    #[test]
    fn test_round_trip_every_value_in_every_slot() {
        for fixed in [i16::MIN, i16::MAX] {
            for slot in 0..4 {
                for value in i16::MIN..=i16::MAX {
                    let mut coefs = [fixed; 4];
                    coefs[slot] = value;
                    let [a, b, c, d] = coefs;
                    assert_eq!(deserialize(serialize(a, b, c, d)), coefs);
                }
            }
        }
    }

    #[test]
    fn test_layout_is_low_endian_by_index() {
        assert_eq!(serialize(1, 0, 0, 0), 0x0000_0000_0000_0001);
        assert_eq!(serialize(0, 1, 0, 0), 0x0000_0000_0001_0000);
        assert_eq!(serialize(0, 0, 0, -1), 0xffff_0000_0000_0000);
        assert_eq!(LINEAR, 6_553_600);
    }

    #[test]
    fn test_any_code_decodes() {
        let curve = PressureCurve::from_code(u64::MAX);
        assert_eq!(curve.coefficients(), [-1, -1, -1, -1]);
        assert_eq!(curve.code(), u64::MAX);
    }

    #[test]
    fn test_quadratic_2_preset_is_bit_exact() {
        assert_eq!(QUADRATIC_2, 0x0000_ff9c_00c8_0000);
        assert_eq!(deserialize(QUADRATIC_2), [0, 200, -100, 0]);
        let preset = preset_by_key("quadratic-2").unwrap();
        assert_eq!(preset.label, "Quadratic 2");
        assert_eq!(preset.code, serialize(0, 200, -100, 0));
    }

    #[test]
    fn test_linear_evaluation() {
        let curve = PressureCurve::from_coefficients([0, 100, 0, 0]);
        assert_eq!(curve.evaluate(0.5, RANGE), 500);
        assert_eq!(curve.evaluate(0.0, RANGE), 0);
        assert_eq!(curve.evaluate(1.0, RANGE), 1000);
    }

    #[test]
    fn test_constant_evaluation() {
        let curve = PressureCurve::from_code(CONSTANT_FULL);
        for x in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(curve.evaluate(x, RANGE), 1000);
        }
    }

    #[test]
    fn test_evaluation_saturates() {
        let soft = PressureCurve::from_code(LINEAR_SOFT_TOUCH);
        assert_eq!(soft.evaluate(1.0, RANGE), 1000);
        assert!(!soft.saturates_at_full_scale());

        let negative = PressureCurve::from_coefficients([-50, 0, 0, 0]);
        assert_eq!(negative.evaluate(0.5, RANGE), 0);

        // Out-of-range input is clamped before evaluation.
        let linear = PressureCurve::default();
        assert_eq!(linear.evaluate(2.0, RANGE), 1000);
        assert_eq!(linear.evaluate(-1.0, RANGE), 0);
    }

    #[test]
    fn test_quadratic_2_midpoint() {
        let curve = PressureCurve::from_code(QUADRATIC_2);
        assert_eq!(curve.evaluate(0.5, RANGE), 750);
        assert!(curve.saturates_at_full_scale());
    }

    #[test]
    fn test_sample() {
        let points = PressureCurve::default().sample(4, RANGE);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], (0.0, 0));
        assert_eq!(points[2], (0.5, 500));
        assert_eq!(points[4], (1.0, 1000));
    }

    #[test]
    fn test_presets_follow_sum_convention() {
        for preset in PRESETS.iter().filter(|p| p.key != "soft-touch") {
            assert!(preset.curve().saturates_at_full_scale(), "{}", preset.label);
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset_for_code(CUBIC_2).map(|p| p.key), Some("cubic-2"));
        assert!(preset_for_code(serialize(1, 2, 3, 4)).is_none());
        assert_eq!(preset_by_key("LINEAR").map(|p| p.code), Some(LINEAR));
    }

    #[test]
    fn test_from_str() {
        let curve: PressureCurve = "0, 200, -100, 0".parse().unwrap();
        assert_eq!(curve.code(), QUADRATIC_2);
        assert_eq!(curve.to_string(), "0,200,-100,0");
        assert!("1,2,3".parse::<PressureCurve>().is_err());
        assert!("1,2,3,40000".parse::<PressureCurve>().is_err());
    }
}
