mod sysfs;
mod veikk;

pub use sysfs::{SysfsSink, DEFAULT_PARAMS_DIR};
pub use veikk::{A15, A30, A50, S640, VK1560};

use crate::params::FieldValue;
use crate::pressure::PressureRange;

/// Error returned by a device sink; the engine only reports it.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Tablet model parameters the engine needs from the device side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub name: &'static str,

    // Highest raw pressure value the pen reports
    pub pressure_max: u32,
}

impl DeviceProfile {
    pub const ALL: [&'static DeviceProfile; 5] = [&S640, &A30, &A50, &A15, &VK1560];

    /// Profile used when none is configured.
    pub fn current() -> &'static Self {
        &S640
    }

    /// Look up a profile by model name, ignoring case.
    pub fn find(name: &str) -> Option<&'static Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn pressure_range(&self) -> PressureRange {
        PressureRange::new(self.pressure_max)
    }
}

/// Destination for committed tablet parameters.
///
/// Each call writes exactly one field and either fully succeeds or leaves
/// the device unchanged for that field. Retries are the sink's business.
pub trait DeviceSink {
    /// Capabilities of the device behind this sink.
    fn capabilities(&self) -> &DeviceProfile;

    fn write(&mut self, value: &FieldValue) -> Result<(), SinkError>;
}
