//! Parameter engine for VEIKK graphics tablets: pressure curve, screen
//! mapping and orientation, committed to the driver field by field.

pub mod config;
pub mod device;
pub mod orientation;
pub mod params;
pub mod pressure;
pub mod screen_map;

pub use device::{DeviceProfile, DeviceSink, SinkError};
pub use orientation::{Orientation, OrientationError};
pub use params::{
    ApplyError, ApplyReport, FieldFailure, FieldKind, FieldMask, FieldValue, ParameterSet,
    ParameterStore,
};
pub use pressure::{PressureCurve, PressureRange, Preset, PRESETS};
pub use screen_map::Rect;
