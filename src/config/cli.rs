use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::orientation::Orientation;
use crate::params::FieldMask;
use crate::pressure::PressureCurve;
use crate::screen_map::Rect;

#[derive(Parser)]
#[command(name = "veikk-config")]
#[command(about = "Configure screen mapping, orientation and pressure curve of VEIKK tablets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Driver parameter directory
    #[arg(long, env = "VEIKK_PARAMS_DIR")]
    pub params_dir: Option<PathBuf>,

    /// Tablet model (S640, A30, A50, A15, VK1560)
    #[arg(long, env = "VEIKK_DEVICE")]
    pub device: Option<String>,

    /// Display geometry as WIDTHxHEIGHT
    #[arg(long)]
    pub screen_size: Option<Rect>,

    /// Path to config file
    #[arg(long, env = "VEIKK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the configuration currently on the device
    Show,
    /// List the built-in pressure curve presets
    Presets,
    /// Print sampled output of a pressure curve
    Curve {
        /// Preset key (see `presets`)
        #[arg(long, conflicts_with = "coefs")]
        preset: Option<String>,

        /// Coefficients a,b,c,d scaled by 100
        #[arg(long, allow_hyphen_values = true)]
        coefs: Option<PressureCurve>,

        /// Number of intervals between 0 and full input
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
    /// Edit and commit settings to the device
    Apply(ApplyArgs),
}

#[derive(Args, Default)]
pub struct ApplyArgs {
    /// Screen map as x,y,width,height
    #[arg(long, allow_hyphen_values = true, conflicts_with = "full_screen")]
    pub screen_map: Option<Rect>,

    /// Map the tablet onto the whole display
    #[arg(long)]
    pub full_screen: bool,

    /// Display orientation (default, rotate-90-ccw, flipped, rotate-90-cw)
    #[arg(long, value_parser = clap::value_parser!(Orientation))]
    pub orientation: Option<Orientation>,

    /// Pressure curve preset key
    #[arg(long, conflicts_with = "pressure_coefs")]
    pub pressure_preset: Option<String>,

    /// Pressure coefficients a,b,c,d scaled by 100
    #[arg(long, allow_hyphen_values = true)]
    pub pressure_coefs: Option<PressureCurve>,

    /// Fields to commit (all, screen, screen-map, orientation, pressure)
    #[arg(long)]
    pub only: Option<FieldMask>,

    /// Show what would be written without touching the device
    #[arg(long)]
    pub dry_run: bool,
}
