use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use plan_canvas::camera::{Camera, Point};
use plan_canvas::config::CanvasConfig;
use plan_canvas::engine::EngineCore;
use plan_canvas::error::{ConfigError, EventError};
use plan_canvas::input::HostEvent;
use plan_canvas::scale::{self, ContainerRect};
use plan_canvas::viewport;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("config file {path} must contain a JSON object")]
    ConfigShape { path: String },
    #[error("invalid pin snapshot: {0}")]
    Snapshot(#[from] EventError),
    #[error("input line {line}: {source}")]
    Event { line: usize, source: EventError },
    #[error("container {width}x{height} has no usable size")]
    Unmeasured { width: f64, height: f64 },
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "plan-canvas", about = "Headless host for the roof-plan viewport engine")]
struct Cli {
    #[arg(long, env = "PLAN_CANVAS_CONFIG", help = "JSON config file; keys override the preset")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Preset::Standard)]
    preset: Preset,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Preset {
    /// Zoom 0.1 to 5.
    Standard,
    /// Zoom 0.3 to 8, for dense plans.
    Performance,
}

impl Preset {
    fn config(self) -> CanvasConfig {
        match self {
            Self::Standard => CanvasConfig::standard(),
            Self::Performance => CanvasConfig::performance(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the aspect-fit scale cache for a container.
    Fit(ContainerArgs),
    /// Resolve a client point to canvas coordinates.
    Locate(LocateArgs),
    /// Feed JSON-lines host events through the engine and print its actions.
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone, Copy)]
struct ContainerArgs {
    #[arg(long)]
    width: f64,

    #[arg(long)]
    height: f64,

    #[arg(long, default_value_t = 0.0)]
    left: f64,

    #[arg(long, default_value_t = 0.0)]
    top: f64,
}

impl ContainerArgs {
    fn rect(self) -> ContainerRect {
        ContainerRect::new(self.left, self.top, self.width, self.height)
    }
}

#[derive(Args, Debug)]
struct LocateArgs {
    #[command(flatten)]
    container: ContainerArgs,

    #[arg(long, allow_hyphen_values = true)]
    x: f64,

    #[arg(long, allow_hyphen_values = true)]
    y: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,

    #[arg(long, default_value_t = 1.0)]
    zoom: f64,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
    input: String,

    #[arg(long, help = "JSON array of pins to load before replaying")]
    pins: Option<PathBuf>,
}

#[derive(Serialize)]
struct Located {
    client: Point,
    canvas: Point,
    unclamped: Point,
    inside: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.preset)?;
    debug!(preset = ?cli.preset, min_scale = config.min_scale, max_scale = config.max_scale, "config loaded");

    match cli.command {
        Command::Fit(args) => run_fit(&config, args),
        Command::Locate(args) => run_locate(&config, &args),
        Command::Replay(args) => run_replay(config, &args),
    }
}

/// Start from the preset and overlay whatever keys the config file sets.
fn load_config(path: Option<&Path>, preset: Preset) -> Result<CanvasConfig, CliError> {
    let base = preset.config();
    let Some(path) = path else {
        return Ok(base);
    };
    let raw = read_file(path)?;
    let overrides: Value = serde_json::from_str(&raw).map_err(ConfigError::from)?;
    let Value::Object(overrides) = overrides else {
        return Err(CliError::ConfigShape { path: path.display().to_string() });
    };
    let mut merged = serde_json::to_value(&base)?;
    if let Value::Object(target) = &mut merged {
        target.extend(overrides);
    }
    let config: CanvasConfig = serde_json::from_value(merged).map_err(ConfigError::from)?;
    config.validate()?;
    Ok(config)
}

fn run_fit(config: &CanvasConfig, args: ContainerArgs) -> Result<(), CliError> {
    let cache = fit(config, args)?;
    print_json(&serde_json::to_value(cache)?)
}

fn run_locate(config: &CanvasConfig, args: &LocateArgs) -> Result<(), CliError> {
    let cache = fit(config, args.container)?;
    let camera = Camera { pan_x: args.pan_x, pan_y: args.pan_y, zoom: config.zoom_limits().clamp(args.zoom) };
    let client = Point::new(args.x, args.y);
    let unclamped = viewport::screen_to_canvas_unclamped(client, &cache, &camera);
    let canvas = config.canvas_size().clamp(unclamped);
    let located = Located { client, canvas, unclamped, inside: canvas == unclamped };
    print_json(&serde_json::to_value(located)?)
}

fn run_replay(config: CanvasConfig, args: &ReplayArgs) -> Result<(), CliError> {
    let mut core = EngineCore::with_config(config)?;
    if let Some(path) = &args.pins {
        let count = core.load_pins_json(&read_file(path)?)?;
        info!(count, "pins loaded");
    }

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input).map_err(|source| CliError::Read { path: args.input.clone(), source })?;
        Box::new(BufReader::new(file))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut events = 0_usize;
    let mut emitted = 0_usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Read { path: args.input.clone(), source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = HostEvent::from_json(trimmed).map_err(|source| CliError::Event { line: index + 1, source })?;
        events += 1;
        for action in core.dispatch(event) {
            writeln!(out, "{}", serde_json::to_string(&action)?)?;
            emitted += 1;
        }
    }

    let transform = core.transform();
    info!(
        events,
        actions = emitted,
        zoom = transform.zoom,
        pan_x = transform.pan_x,
        pan_y = transform.pan_y,
        "replay complete"
    );
    Ok(())
}

fn fit(config: &CanvasConfig, args: ContainerArgs) -> Result<scale::ScaleCache, CliError> {
    scale::compute_scale(args.rect(), config.canvas_size())
        .ok_or(CliError::Unmeasured { width: args.width, height: args.height })
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.display().to_string(), source })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
