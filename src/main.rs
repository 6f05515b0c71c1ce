use clap::Parser;

use veikk_config::config::{Cli, Command, Config};
use veikk_config::device::SysfsSink;
use veikk_config::params::{FieldMask, ParameterStore};
use veikk_config::pressure::{preset_by_key, preset_for_code, PressureCurve, PRESETS};
use veikk_config::DeviceSink;

type Error = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(&cli)?;
    log::debug!("Using {:?}", config);

    match cli.command {
        None | Some(Command::Show) => show(&config),
        Some(Command::Presets) => {
            list_presets();
            Ok(())
        }
        Some(Command::Curve {
            preset,
            coefs,
            steps,
        }) => print_curve(&config, preset.as_deref(), coefs, steps),
        Some(Command::Apply(args)) => apply(&config, args.only, args.dry_run),
    }
}

fn open_store(config: &Config) -> Result<(SysfsSink, ParameterStore), Error> {
    let sink = SysfsSink::new(&config.params_dir, config.device);

    let screen_size = match config.screen_size {
        Some(size) => size,
        None => sink
            .read_screen_size()?
            .ok_or("Display geometry unknown; pass --screen-size WIDTHxHEIGHT")?,
    };

    let params = sink.read_parameters(screen_size)?;
    log::info!(
        "Loaded {} parameters from {}",
        sink.capabilities().name,
        sink.dir().display()
    );

    Ok((sink, ParameterStore::new(params)))
}

fn show(config: &Config) -> Result<(), Error> {
    let (_sink, store) = open_store(config)?;
    let params = store.baseline();

    println!("device:       {}", config.device.name);
    println!("screen size:  {}", params.screen_size);
    if store.is_invalid_screen_map() {
        println!("screen map:   unset (full screen)");
    } else if store.is_full_screen_map() {
        println!("screen map:   {} (full screen)", params.screen_map);
    } else {
        println!("screen map:   {}", params.screen_map);
    }
    println!(
        "orientation:  {} ({})",
        params.orientation,
        params.orientation.label()
    );
    print_pressure_line(&params.pressure_curve);
    Ok(())
}

fn print_pressure_line(curve: &PressureCurve) {
    match preset_for_code(curve.code()) {
        Some(preset) => println!("pressure map: {} [{}]", curve, preset.label),
        None => println!("pressure map: {}", curve),
    }
}

fn list_presets() {
    for preset in PRESETS.iter() {
        println!(
            "{:<12} {:<24} {:>20}  ({})",
            preset.key,
            preset.label,
            preset.code,
            preset.curve()
        );
    }
}

fn print_curve(
    config: &Config,
    preset: Option<&str>,
    coefs: Option<PressureCurve>,
    steps: usize,
) -> Result<(), Error> {
    let curve = match (preset, coefs) {
        (Some(key), _) => preset_by_key(key)
            .map(|p| p.curve())
            .ok_or_else(|| format!("Unknown pressure preset '{}'", key))?,
        (None, Some(curve)) => curve,
        (None, None) => config.edits.pressure.unwrap_or_default(),
    };

    let range = config.device.pressure_range();
    print_pressure_line(&curve);
    for (x, output) in curve.sample(steps, range) {
        println!("{:>5.2}  {:>6}", x, output);
    }
    Ok(())
}

fn apply(config: &Config, only: Option<FieldMask>, dry_run: bool) -> Result<(), Error> {
    let (mut sink, mut store) = open_store(config)?;

    let mask = stage(config, &mut store, only);
    if mask.is_empty() {
        log::info!("Nothing to apply");
        return Ok(());
    }

    if dry_run {
        describe(&store, mask);
        return Ok(());
    }

    let report = store.apply_config(mask, &mut sink);
    for kind in &report.committed {
        println!("applied {}", kind);
    }
    report.into_result()?;
    Ok(())
}

/// Put the configured edits into `current` and pick the fields to commit.
///
/// The full-screen fallback only runs when the screen map is being committed.
fn stage(config: &Config, store: &mut ParameterStore, only: Option<FieldMask>) -> FieldMask {
    config.edits.apply_to(store);

    let mask = only.unwrap_or_else(|| config.edits.mask());
    if mask.intersects(FieldMask::SCREEN_MAP) && store.ensure_valid_screen_map() {
        log::info!("Screen map unset, using full screen {}", store.screen_size());
    }
    mask
}

fn describe(store: &ParameterStore, mask: FieldMask) {
    let current = store.current();
    let baseline = store.baseline();
    for kind in mask.fields() {
        println!(
            "would apply {}: {:?} -> {:?}",
            kind,
            baseline.field(kind),
            current.field(kind)
        );
    }
    if mask.intersects(FieldMask::SCREEN_MAP) && store.is_full_screen_map() {
        println!("screen map covers the full display");
    }
}
