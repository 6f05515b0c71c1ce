//! Device sink backed by the `veikk` driver's module parameters.
//!
//! Each field lives in its own file under the parameter directory and holds
//! one decimal integer:
//!
//! - `screen_map`: x, y, width, height as four 16-bit fields, x lowest
//! - `orientation`: ordinal 0..=3
//! - `pressure_map`: the 64-bit pressure curve code
//! - `screen_size`: width in the low 16 bits, height in the next 16 (read only)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::orientation::Orientation;
use crate::params::{FieldKind, FieldValue, ParameterSet};
use crate::pressure::PressureCurve;
use crate::screen_map::Rect;

use super::{DeviceProfile, DeviceSink, SinkError};

pub const DEFAULT_PARAMS_DIR: &str = "/sys/module/veikk/parameters";

const SCREEN_SIZE_FILE: &str = "screen_size";

pub struct SysfsSink {
    dir: PathBuf,
    profile: &'static DeviceProfile,
}

impl SysfsSink {
    pub fn new(dir: impl Into<PathBuf>, profile: &'static DeviceProfile) -> Self {
        Self {
            dir: dir.into(),
            profile,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the configuration currently held by the driver.
    ///
    /// Missing parameter files leave the corresponding field at its default.
    pub fn read_parameters(&self, screen_size: Rect) -> Result<ParameterSet, SinkError> {
        let mut params = ParameterSet {
            screen_size,
            ..ParameterSet::default()
        };

        if let Some(raw) = self.read_value(FieldKind::ScreenMap)? {
            params.screen_map = unpack_rect(raw);
        }
        if let Some(raw) = self.read_value(FieldKind::Orientation)? {
            let ordinal = u32::try_from(raw).map_err(|_| format!("orientation {} out of range", raw))?;
            params.orientation = Orientation::from_ordinal(ordinal)?;
        }
        if let Some(raw) = self.read_value(FieldKind::PressureMap)? {
            params.pressure_curve = PressureCurve::from_code(raw);
        }

        log::debug!("Read parameters from {}: {:?}", self.dir.display(), params);
        Ok(params)
    }

    /// Display geometry last reported to the driver, if any.
    pub fn read_screen_size(&self) -> Result<Option<Rect>, SinkError> {
        let Some(raw) = self.read_file(SCREEN_SIZE_FILE)? else {
            return Ok(None);
        };
        let width = (raw & 0xffff) as i32;
        let height = ((raw >> 16) & 0xffff) as i32;
        let size = Rect::from_size(width, height);
        Ok(size.is_valid().then_some(size))
    }

    fn read_value(&self, kind: FieldKind) -> Result<Option<u64>, SinkError> {
        self.read_file(file_name(kind))
    }

    fn read_file(&self, name: &str) -> Result<Option<u64>, SinkError> {
        let path = self.dir.join(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not present, using default", path.display());
                return Ok(None);
            }
            Err(e) => return Err(format!("Failed to read {}: {}", path.display(), e).into()),
        };

        let value = content
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("Invalid value in {}: {}", path.display(), e))?;
        Ok(Some(value))
    }
}

impl DeviceSink for SysfsSink {
    fn capabilities(&self) -> &DeviceProfile {
        self.profile
    }

    fn write(&mut self, value: &FieldValue) -> Result<(), SinkError> {
        let raw = match value {
            FieldValue::ScreenMap(rect) => pack_rect(rect)?,
            FieldValue::Orientation(o) => u64::from(o.ordinal()),
            FieldValue::PressureMap(curve) => curve.code(),
        };

        let path = self.dir.join(file_name(value.kind()));
        log::debug!("Writing {} to {}", raw, path.display());
        fs::write(&path, raw.to_string())
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        Ok(())
    }
}

fn file_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::ScreenMap => "screen_map",
        FieldKind::Orientation => "orientation",
        FieldKind::PressureMap => "pressure_map",
    }
}

fn pack_rect(rect: &Rect) -> Result<u64, SinkError> {
    let components = [
        ("x", rect.x),
        ("y", rect.y),
        ("width", rect.width),
        ("height", rect.height),
    ];

    let mut packed = 0u64;
    for (i, (name, value)) in components.into_iter().enumerate() {
        let field = u16::try_from(value)
            .map_err(|_| format!("screen map {} {} does not fit in 16 bits", name, value))?;
        packed |= u64::from(field) << (16 * i);
    }
    Ok(packed)
}

fn unpack_rect(raw: u64) -> Rect {
    let field = |i: u32| ((raw >> (16 * i)) & 0xffff) as i32;
    Rect::new(field(0), field(1), field(2), field(3))
}
