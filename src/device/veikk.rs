//! VEIKK tablet models handled by the `veikk` kernel driver.
//! All current models report 8192 pressure levels.

use super::DeviceProfile;

pub const S640: DeviceProfile = DeviceProfile {
    name: "S640",
    pressure_max: 8191,
};

pub const A30: DeviceProfile = DeviceProfile {
    name: "A30",
    pressure_max: 8191,
};

pub const A50: DeviceProfile = DeviceProfile {
    name: "A50",
    pressure_max: 8191,
};

pub const A15: DeviceProfile = DeviceProfile {
    name: "A15",
    pressure_max: 8191,
};

pub const VK1560: DeviceProfile = DeviceProfile {
    name: "VK1560",
    pressure_max: 8191,
};
