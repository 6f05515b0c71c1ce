//! Tablet parameters and the field masks that select them.

mod store;

pub use store::{ApplyError, ApplyReport, FieldFailure, ParameterStore};

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::orientation::Orientation;
use crate::pressure::PressureCurve;
use crate::screen_map::Rect;

/// One user-editable field of a [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    ScreenMap,
    Orientation,
    PressureMap,
}

impl FieldKind {
    /// Processing order for multi-field masks.
    pub const ORDER: [FieldKind; 3] = [
        FieldKind::ScreenMap,
        FieldKind::Orientation,
        FieldKind::PressureMap,
    ];

    pub fn mask(self) -> FieldMask {
        match self {
            FieldKind::ScreenMap => FieldMask::SCREEN_MAP,
            FieldKind::Orientation => FieldMask::ORIENTATION,
            FieldKind::PressureMap => FieldMask::PRESSURE_MAP,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::ScreenMap => write!(f, "screen_map"),
            FieldKind::Orientation => write!(f, "orientation"),
            FieldKind::PressureMap => write!(f, "pressure_map"),
        }
    }
}

/// Set of fields an apply or restore acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldMask(u32);

impl FieldMask {
    pub const NONE: FieldMask = FieldMask(0);
    pub const SCREEN_MAP: FieldMask = FieldMask(1 << 0);
    pub const ORIENTATION: FieldMask = FieldMask(1 << 1);
    pub const PRESSURE_MAP: FieldMask = FieldMask(1 << 2);
    pub const SCREEN: FieldMask = FieldMask(Self::SCREEN_MAP.0 | Self::ORIENTATION.0);
    pub const ALL: FieldMask = FieldMask(Self::SCREEN.0 | Self::PRESSURE_MAP.0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Bits outside [`FieldMask::ALL`] are dropped.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        FieldMask(bits & Self::ALL.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any flag of `other` is set in `self`.
    pub const fn intersects(self, other: FieldMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: FieldMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Selected fields in [`FieldKind::ORDER`].
    pub fn fields(self) -> impl Iterator<Item = FieldKind> {
        FieldKind::ORDER
            .into_iter()
            .filter(move |kind| self.intersects(kind.mask()))
    }
}

impl BitOr for FieldMask {
    type Output = FieldMask;

    fn bitor(self, rhs: FieldMask) -> FieldMask {
        FieldMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for FieldMask {
    fn bitor_assign(&mut self, rhs: FieldMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FieldMask {
    type Output = FieldMask;

    fn bitand(self, rhs: FieldMask) -> FieldMask {
        FieldMask(self.0 & rhs.0)
    }
}

impl From<FieldKind> for FieldMask {
    fn from(kind: FieldKind) -> Self {
        kind.mask()
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<String> = self.fields().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}

impl FromStr for FieldMask {
    type Err = String;

    /// Parses group names joined by `+` or `,`, e.g. `screen` or `orientation+pressure`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = FieldMask::NONE;
        for part in s.split(['+', ',']) {
            mask |= match part.trim().to_lowercase().as_str() {
                "all" => FieldMask::ALL,
                "screen" => FieldMask::SCREEN,
                "screen-map" | "screen_map" => FieldMask::SCREEN_MAP,
                "orientation" => FieldMask::ORIENTATION,
                "pressure" | "pressure-map" | "pressure_map" => FieldMask::PRESSURE_MAP,
                other => {
                    return Err(format!(
                        "Invalid field '{}'. Valid values: all, screen, screen-map, orientation, pressure",
                        other
                    ))
                }
            };
        }
        Ok(mask)
    }
}

/// The typed value of one field, as handed to a device sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    ScreenMap(Rect),
    Orientation(Orientation),
    PressureMap(PressureCurve),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::ScreenMap(_) => FieldKind::ScreenMap,
            FieldValue::Orientation(_) => FieldKind::Orientation,
            FieldValue::PressureMap(_) => FieldKind::PressureMap,
        }
    }
}

/// A complete tablet configuration.
///
/// `screen_size` mirrors the live display and is not covered by any mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParameterSet {
    pub screen_size: Rect,
    pub screen_map: Rect,
    pub orientation: Orientation,
    pub pressure_curve: PressureCurve,
}

impl ParameterSet {
    pub fn field(&self, kind: FieldKind) -> FieldValue {
        match kind {
            FieldKind::ScreenMap => FieldValue::ScreenMap(self.screen_map),
            FieldKind::Orientation => FieldValue::Orientation(self.orientation),
            FieldKind::PressureMap => FieldValue::PressureMap(self.pressure_curve),
        }
    }

    pub fn set_field(&mut self, value: FieldValue) {
        match value {
            FieldValue::ScreenMap(rect) => self.screen_map = rect,
            FieldValue::Orientation(o) => self.orientation = o,
            FieldValue::PressureMap(curve) => self.pressure_curve = curve,
        }
    }

    /// Copy the masked fields from `other`.
    pub fn copy_fields(&mut self, other: &ParameterSet, mask: FieldMask) {
        for kind in mask.fields() {
            self.set_field(other.field(kind));
        }
    }

    /// Fields whose values differ from `other`.
    pub fn diff(&self, other: &ParameterSet) -> FieldMask {
        FieldKind::ORDER
            .into_iter()
            .filter(|&kind| self.field(kind) != other.field(kind))
            .fold(FieldMask::NONE, |mask, kind| mask | kind.mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convenience_unions() {
        assert_eq!(FieldMask::SCREEN, FieldMask::SCREEN_MAP | FieldMask::ORIENTATION);
        assert_eq!(FieldMask::ALL, FieldMask::SCREEN | FieldMask::PRESSURE_MAP);
        assert!(FieldMask::SCREEN.intersects(FieldMask::ORIENTATION));
        assert!(!FieldMask::SCREEN.intersects(FieldMask::PRESSURE_MAP));
        assert!((FieldMask::ALL & FieldMask::PRESSURE_MAP) == FieldMask::PRESSURE_MAP);
    }

    #[test]
    fn test_stable_bits() {
        assert_eq!(FieldMask::SCREEN_MAP.bits(), 0b001);
        assert_eq!(FieldMask::ORIENTATION.bits(), 0b010);
        assert_eq!(FieldMask::PRESSURE_MAP.bits(), 0b100);
        assert_eq!(FieldMask::ALL.bits(), 0b111);
        assert_eq!(FieldMask::from_bits_truncate(0xff), FieldMask::ALL);
    }

    #[test]
    fn test_fields_follow_fixed_order() {
        let order: Vec<FieldKind> = FieldMask::ALL.fields().collect();
        assert_eq!(order, FieldKind::ORDER.to_vec());

        let pressure_only: Vec<FieldKind> = FieldMask::PRESSURE_MAP.fields().collect();
        assert_eq!(pressure_only, vec![FieldKind::PressureMap]);
        assert_eq!(FieldMask::NONE.fields().count(), 0);
    }

    #[test]
    fn test_mask_from_str() {
        assert_eq!("screen".parse::<FieldMask>().unwrap(), FieldMask::SCREEN);
        assert_eq!(
            "orientation+pressure".parse::<FieldMask>().unwrap(),
            FieldMask::ORIENTATION | FieldMask::PRESSURE_MAP
        );
        assert_eq!("ALL".parse::<FieldMask>().unwrap(), FieldMask::ALL);
        assert!("screen+size".parse::<FieldMask>().is_err());
        assert_eq!(FieldMask::SCREEN.to_string(), "screen_map+orientation");
    }

    #[test]
    fn test_copy_fields_leaves_others() {
        let mut target = ParameterSet::default();
        let source = ParameterSet {
            screen_size: Rect::from_size(800, 600),
            screen_map: Rect::new(0, 0, 400, 300),
            orientation: Orientation::Flipped,
            pressure_curve: PressureCurve::from_coefficients([0, 0, 100, 0]),
        };

        target.copy_fields(&source, FieldMask::ORIENTATION);
        assert_eq!(target.orientation, Orientation::Flipped);
        assert_eq!(target.screen_map, Rect::default());
        assert_eq!(target.pressure_curve, PressureCurve::default());
        assert_eq!(target.screen_size, Rect::default());

        assert_eq!(target.diff(&source), FieldMask::SCREEN_MAP | FieldMask::PRESSURE_MAP);
    }
}
