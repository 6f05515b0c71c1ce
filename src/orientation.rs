//! Display orientation the driver applies to tablet coordinates.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrientationError {
    #[error("orientation ordinal {0} out of range (expected 0..=3)")]
    BadOrdinal(u32),
    #[error("invalid orientation '{0}'. Valid values: default, rotate-90-ccw, flipped, rotate-90-cw")]
    Unknown(String),
}

/// Rotation of the mapped area relative to the tablet's natural position.
///
/// The ordinal (0..=3) is what the driver stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Orientation {
    #[default]
    Default,
    /// Rotated 90° counter-clockwise.
    Rotate90Ccw,
    /// Rotated 180°.
    Flipped,
    /// Rotated 90° clockwise.
    Rotate90Cw,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Default,
        Orientation::Rotate90Ccw,
        Orientation::Flipped,
        Orientation::Rotate90Cw,
    ];

    pub fn ordinal(self) -> u32 {
        match self {
            Orientation::Default => 0,
            Orientation::Rotate90Ccw => 1,
            Orientation::Flipped => 2,
            Orientation::Rotate90Cw => 3,
        }
    }

    pub fn from_ordinal(ordinal: u32) -> Result<Self, OrientationError> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(OrientationError::BadOrdinal(ordinal))
    }

    /// Human-readable label as shown in the orientation picker.
    pub fn label(self) -> &'static str {
        match self {
            Orientation::Default => "Default",
            Orientation::Rotate90Ccw => "90deg CCW",
            Orientation::Flipped => "Flipped",
            Orientation::Rotate90Cw => "90deg CW",
        }
    }
}

impl From<Orientation> for u32 {
    fn from(orientation: Orientation) -> Self {
        orientation.ordinal()
    }
}

impl TryFrom<u32> for Orientation {
    type Error = OrientationError;

    fn try_from(ordinal: u32) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal)
    }
}

impl TryFrom<String> for Orientation {
    type Error = OrientationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Default => write!(f, "default"),
            Orientation::Rotate90Ccw => write!(f, "rotate-90-ccw"),
            Orientation::Flipped => write!(f, "flipped"),
            Orientation::Rotate90Cw => write!(f, "rotate-90-cw"),
        }
    }
}

impl FromStr for Orientation {
    type Err = OrientationError;

    /// Accepts the display names, a few short aliases, or the ordinal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if let Ok(ordinal) = lower.parse::<u32>() {
            return Self::from_ordinal(ordinal);
        }

        match lower.as_str() {
            "default" | "normal" => Ok(Orientation::Default),
            "rotate-90-ccw" | "rotate_90_ccw" | "90ccw" | "ccw" => Ok(Orientation::Rotate90Ccw),
            "flipped" | "rotate-180" | "180" => Ok(Orientation::Flipped),
            "rotate-90-cw" | "rotate_90_cw" | "90cw" | "cw" => Ok(Orientation::Rotate90Cw),
            _ => Err(OrientationError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_round_trip() {
        for (i, o) in Orientation::ALL.iter().enumerate() {
            assert_eq!(o.ordinal(), i as u32);
            assert_eq!(Orientation::from_ordinal(i as u32), Ok(*o));
        }
    }

    #[test]
    fn test_bad_ordinal_is_rejected() {
        assert_eq!(Orientation::try_from(4), Err(OrientationError::BadOrdinal(4)));
        assert_eq!(
            Orientation::from_ordinal(u32::MAX),
            Err(OrientationError::BadOrdinal(u32::MAX))
        );
        assert!("7".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("default".parse::<Orientation>().unwrap(), Orientation::Default);
        assert_eq!("rotate_90_ccw".parse::<Orientation>().unwrap(), Orientation::Rotate90Ccw);
        assert_eq!("Flipped".parse::<Orientation>().unwrap(), Orientation::Flipped);
        assert_eq!("3".parse::<Orientation>().unwrap(), Orientation::Rotate90Cw);
        assert!(matches!(
            "sideways".parse::<Orientation>(),
            Err(OrientationError::Unknown(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for o in Orientation::ALL {
            assert_eq!(o.to_string().parse::<Orientation>().unwrap(), o);
        }
    }
}
