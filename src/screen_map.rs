//! Screen-mapping rectangle: the part of the display the tablet's active
//! area is mapped onto, in display pixels.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// An integer rectangle in display-pixel coordinates.
///
/// Used both for the display geometry and for the screen map. A map equal
/// to the display geometry is the full-screen default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin, the shape of a display geometry.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// A zero width or height means the map was never set.
    pub fn is_valid(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    /// True iff this map covers exactly the given display geometry.
    pub fn is_default(&self, screen: &Rect) -> bool {
        self == screen
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Rect {
    type Err = String;

    /// Accepts `x,y,width,height` or a bare `WIDTHxHEIGHT` size.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((w, h)) = s.split_once(['x', 'X']) {
            let width = parse_component(w, "width")?;
            let height = parse_component(h, "height")?;
            return Ok(Rect::from_size(width, height));
        }

        let parts: Vec<&str> = s.split(',').collect();
        match parts.as_slice() {
            [x, y, w, h] => Ok(Rect::new(
                parse_component(x, "x")?,
                parse_component(y, "y")?,
                parse_component(w, "width")?,
                parse_component(h, "height")?,
            )),
            _ => Err(format!(
                "Invalid rectangle '{}'. Expected x,y,width,height or WIDTHxHEIGHT",
                s
            )),
        }
    }
}

impl TryFrom<String> for Rect {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

fn parse_component(value: &str, name: &str) -> Result<i32, String> {
    value
        .trim()
        .parse()
        .map_err(|e| format!("Invalid {} '{}': {}", name, value.trim(), e))
}
