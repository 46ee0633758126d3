use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use covercrop::{Corner, EditorConfig, EditorSession, InputEvent, PngFileSink, Preset};

#[derive(Parser, Debug)]
#[command(name = "covercrop", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Frame an image and write the clipped result as a PNG.
    Export(ExportArgs),
    /// Print the cover-fit scale and zoom bounds for an image.
    Fit(FitArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Source image (JPEG, PNG or WebP).
    #[arg(long)]
    image: PathBuf,

    /// JSON configuration file. Overrides `--preset`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in configuration.
    #[arg(long, value_enum, default_value_t = PresetChoice::Banner)]
    preset: PresetChoice,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output PNG path. Defaults to the configured file name.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Horizontal pan in frame pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    /// Vertical pan in frame pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,

    /// Relative zoom factor applied about the frame center.
    #[arg(long)]
    zoom: Option<f64>,

    /// Absolute scale, as the zoom slider would set it.
    #[arg(long, conflicts_with = "zoom")]
    scale: Option<f64>,

    /// Corner radius override, e.g. `tr=32`. Repeatable.
    #[arg(long = "radius", value_parser = parse_radius)]
    radii: Vec<(Corner, f64)>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Banner,
    Card,
}

impl From<PresetChoice> for Preset {
    fn from(value: PresetChoice) -> Self {
        match value {
            PresetChoice::Banner => Preset::Banner,
            PresetChoice::Card => Preset::Card,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Fit(args) => cmd_fit(args),
    }
}

fn parse_radius(s: &str) -> Result<(Corner, f64), String> {
    let (corner, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CORNER=PX, got '{s}'"))?;
    let corner = Corner::parse(corner).ok_or_else(|| format!("unknown corner '{corner}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad radius '{value}': {e}"))?;
    Ok((corner, value))
}

fn load_config(source: &SourceArgs) -> anyhow::Result<EditorConfig> {
    match &source.config {
        Some(path) => Ok(EditorConfig::from_path(path)?),
        None => Ok(Preset::from(source.preset).config()),
    }
}

fn open_session(source: &SourceArgs) -> anyhow::Result<EditorSession> {
    let config = load_config(source)?;
    let mut session = EditorSession::new(config)?;
    let bytes = std::fs::read(&source.image)
        .with_context(|| format!("read image '{}'", source.image.display()))?;
    let mime = covercrop::mime_for_path(&source.image);
    session
        .load_bytes(&bytes, mime)
        .with_context(|| format!("load image '{}'", source.image.display()))?;
    Ok(session)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.source)?;

    for (corner, value) in &args.radii {
        session.handle(InputEvent::CornerRadius {
            corner: *corner,
            value: *value,
        });
    }
    if let Some(scale) = args.scale {
        session.handle(InputEvent::ZoomSlider { value: scale });
    }
    if let Some(factor) = args.zoom {
        session.handle(InputEvent::Wheel {
            delta_y: -factor.ln() / session.config().wheel_sensitivity,
        });
    }
    session.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    session.handle(InputEvent::PointerMove {
        x: args.pan_x,
        y: args.pan_y,
    });
    session.handle(InputEvent::PointerUp);

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&session.config().export_file_name));
    let mut sink = PngFileSink::new(out);
    session.export_to(&mut sink)?;

    if let Some(status) = session.status_line() {
        eprintln!("{status}");
    }
    eprintln!("wrote {}", sink.path().display());
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let session = open_session(&args.source)?;
    let view = session
        .view()
        .with_context(|| format!("no view for '{}'", args.source.image.display()))?;
    println!(
        "frame {}x{}  cover {:.4}  min {:.4}  max {:.4}",
        view.frame().width,
        view.frame().height,
        view.cover_scale(),
        view.min_scale(),
        view.max_scale()
    );
    Ok(())
}
