use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use starfield_core::{
    FrameClock, Rect, Recorder, RecordingSettings, RecordingSurface, SettingField,
    StarfieldConfig, StarfieldEngine, StarfieldError,
};
use tracing_subscriber::EnvFilter;

fn main() -> starfield_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            view,
            frames,
            realtime,
        } => run_headless(&view, frames, realtime),
        Commands::Record {
            view,
            output,
            frames,
        } => run_record(&view, output, frames),
        Commands::Config { action, config } => run_config(action, config.as_deref()),
    }
}

fn run_headless(view: &ViewArgs, frames: u32, realtime: bool) -> starfield_core::Result<()> {
    let config = load_config(view.config.as_deref());
    tracing::info!(
        stars = config.star_count,
        width = view.width,
        height = view.height,
        frames,
        realtime,
        "starting headless run"
    );

    let interval = config.frame_interval();
    let fixed_dt = 1.0 / config.target_fps.max(1) as f32;
    let bounds = Rect::from_size(view.width, view.height);
    let mut engine = build_engine(config, view.seed);
    let mut surface = RecordingSurface::new();
    let mut clock = FrameClock::start();
    let mut trail_total = 0.0_f64;

    for _ in 0..frames {
        let dt = if realtime {
            std::thread::sleep(clock.until_next(interval));
            clock.tick()
        } else {
            clock.tick();
            fixed_dt
        };

        engine.update(dt, view.width, view.height);
        engine.render(&mut surface, bounds);
        trail_total += engine
            .stars()
            .iter()
            .map(|star| star.trail_length() as f64)
            .sum::<f64>();
    }

    let drawn = clock.frames() as f64 * engine.stars().len() as f64;
    let mean_trail = if drawn > 0.0 { trail_total / drawn } else { 0.0 };

    tracing::info!(
        frames = clock.frames(),
        elapsed = ?clock.elapsed(),
        lines = surface.line_count(),
        circles = surface.circle_count(),
        mean_trail_px = mean_trail,
        "finished headless run"
    );
    Ok(())
}

fn run_record(view: &ViewArgs, output: PathBuf, frames: u32) -> starfield_core::Result<()> {
    let config = load_config(view.config.as_deref());
    let settings = RecordingSettings {
        output_dir: output,
        width: view.width,
        height: view.height,
        fps: config.target_fps,
        frames,
    };
    tracing::info!(output = ?settings.output_dir, frames, "recording frames");

    let mut engine = build_engine(config, view.seed);
    Recorder::new(settings).record(&mut engine)?;
    Ok(())
}

fn run_config(action: ConfigAction, path: Option<&Path>) -> starfield_core::Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => StarfieldConfig::default_path()
            .ok_or_else(|| StarfieldError::msg("no local data directory available"))?,
    };

    match action {
        ConfigAction::Show => {
            let config = StarfieldConfig::load_from(&path);
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Reset => StarfieldConfig::default().save_to(&path)?,
        ConfigAction::Set { field, value } => {
            let field: SettingField = field.parse()?;
            let mut config = StarfieldConfig::load_from(&path);
            config.set_field(field, &value)?;
            config.save_to(&path)?;
            tracing::info!(%field, value = %value, "updated setting");
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> StarfieldConfig {
    match path {
        Some(path) => StarfieldConfig::load_from(path),
        None => StarfieldConfig::load(),
    }
}

fn build_engine(config: StarfieldConfig, seed: Option<u64>) -> StarfieldEngine {
    match seed {
        Some(seed) => StarfieldEngine::with_seed(config, seed),
        None => StarfieldEngine::new(config),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Starfield warp screensaver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate and render frames without a window.
    Run {
        #[command(flatten)]
        view: ViewArgs,
        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: u32,
        /// Pace frames with the configured timer and feed measured time.
        #[arg(long)]
        realtime: bool,
    },
    /// Write rendered frames to a directory as SVG files.
    Record {
        #[command(flatten)]
        view: ViewArgs,
        /// Directory receiving the frame files.
        #[arg(short, long)]
        output: PathBuf,
        /// Number of frames to write.
        #[arg(short, long, default_value_t = 120)]
        frames: u32,
    },
    /// Inspect or reset the persisted settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
        /// Settings file to use instead of the default location.
        #[arg(long, global = true)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigAction {
    /// Print the effective settings as JSON.
    Show,
    /// Print the settings file location.
    Path,
    /// Overwrite the settings file with defaults.
    Reset,
    /// Change one setting, clamped to its allowed range, and save it.
    Set {
        /// Setting key, e.g. `star_count` or `warp_speed`.
        field: String,
        /// New value; flags accept true/false or on/off.
        value: String,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: i32,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: i32,
    /// Seed for reproducible star placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Settings file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}
