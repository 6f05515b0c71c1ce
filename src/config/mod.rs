mod cli;
mod file;

pub use cli::{ApplyArgs, Cli, Command};

use std::path::PathBuf;

use crate::device::{DeviceProfile, DEFAULT_PARAMS_DIR};
use crate::orientation::Orientation;
use crate::params::{FieldMask, ParameterStore};
use crate::pressure::{preset_by_key, PressureCurve};
use crate::screen_map::Rect;

use file::FileConfig;

type ConfigError = Box<dyn std::error::Error + Send + Sync>;

/// Requested changes to the editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edits {
    pub screen_map: Option<Rect>,
    pub full_screen: bool,
    pub orientation: Option<Orientation>,
    pub pressure: Option<PressureCurve>,
}

impl Edits {
    /// Fields these edits touch.
    pub fn mask(&self) -> FieldMask {
        let mut mask = FieldMask::NONE;
        if self.screen_map.is_some() || self.full_screen {
            mask |= FieldMask::SCREEN_MAP;
        }
        if self.orientation.is_some() {
            mask |= FieldMask::ORIENTATION;
        }
        if self.pressure.is_some() {
            mask |= FieldMask::PRESSURE_MAP;
        }
        mask
    }

    pub fn apply_to(&self, store: &mut ParameterStore) {
        if self.full_screen {
            store.use_full_screen_map();
        } else if let Some(map) = self.screen_map {
            store.set_screen_map(map);
        }
        if let Some(orientation) = self.orientation {
            store.set_orientation(orientation);
        }
        if let Some(curve) = self.pressure {
            store.set_pressure_map(curve.coefficients());
        }
    }
}

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub params_dir: PathBuf,
    pub device: &'static DeviceProfile,
    pub screen_size: Option<Rect>,
    pub edits: Edits,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file_config = match &cli.config {
            Some(path) => file::load_from_path(path)?,
            None => file::load_from_default_paths().unwrap_or_default(),
        };

        let apply_args = match &cli.command {
            Some(Command::Apply(args)) => Some(args),
            _ => None,
        };

        Self::merge(cli, apply_args, file_config)
    }

    fn merge(
        cli: &Cli,
        apply_args: Option<&ApplyArgs>,
        file_config: FileConfig,
    ) -> Result<Self, ConfigError> {
        let device = match cli.device.as_ref().or(file_config.device.as_ref()) {
            Some(name) => DeviceProfile::find(name)
                .ok_or_else(|| format!("Unknown device model '{}'", name))?,
            None => DeviceProfile::current(),
        };

        let defaults = ApplyArgs::default();
        let args = apply_args.unwrap_or(&defaults);

        let pressure = match (&args.pressure_preset, args.pressure_coefs) {
            (Some(key), _) => Some(resolve_preset(key)?),
            (None, Some(curve)) => Some(curve),
            (None, None) => match (&file_config.pressure_preset, file_config.pressure_coefs) {
                (Some(key), _) => Some(resolve_preset(key)?),
                (None, Some(coefs)) => Some(PressureCurve::from_coefficients(coefs)),
                (None, None) => None,
            },
        };

        // An explicit map on the command line overrides a full-screen file setting.
        let full_screen = args.full_screen || (args.screen_map.is_none() && file_config.full_screen);

        Ok(Self {
            params_dir: cli
                .params_dir
                .clone()
                .or(file_config.params_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMS_DIR)),
            device,
            screen_size: cli.screen_size.or(file_config.screen_size),
            edits: Edits {
                screen_map: args.screen_map.or(file_config.screen_map),
                full_screen,
                orientation: args.orientation.or(file_config.orientation),
                pressure,
            },
        })
    }
}

fn resolve_preset(key: &str) -> Result<PressureCurve, ConfigError> {
    preset_by_key(key)
        .map(|p| p.curve())
        .ok_or_else(|| format!("Unknown pressure preset '{}'", key).into())
}
