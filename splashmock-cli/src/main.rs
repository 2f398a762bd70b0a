use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use splashmock::{DeviceKind, DisplayFields, PreviewSession, RenderOpts, UploadedIcon};

#[derive(Parser, Debug)]
#[command(name = "splashmock", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the launch-screen mock as SVG or PNG (chosen by the output extension).
    Render(RenderArgs),
    /// Print the derived display fields as JSON.
    Fields(SourceArgs),
    /// Print the ink color (black/white) for each background color.
    Contrast(ContrastArgs),
    /// Re-render whenever the manifest or icon file changes.
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Manifest JSON. Defaults to the bundled example.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Icon image that overrides every icon in the manifest.
    #[arg(long)]
    icon: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Device frame(s) to draw.
    #[arg(long, value_enum, default_value_t = DeviceChoice::Both)]
    device: DeviceChoice,

    /// Output path; `.svg` writes SVG, anything else writes PNG.
    #[arg(long)]
    out: PathBuf,

    /// Pixel density for PNG output.
    #[arg(long, default_value_t = 2.0)]
    scale: f32,

    /// Directory manifest icon paths resolve against. Defaults to the manifest's directory.
    #[arg(long)]
    resources_dir: Option<PathBuf>,

    /// Leave the sheet background transparent.
    #[arg(long, default_value_t = false)]
    transparent: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct ContrastArgs {
    /// Colors such as `#0C1427` or `fff`.
    #[arg(required = true)]
    colors: Vec<String>,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    /// Manifest JSON to watch.
    #[arg(long)]
    manifest: PathBuf,

    /// Icon image to watch; overrides every icon in the manifest.
    #[arg(long)]
    icon: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Stop after this many polls (runs until interrupted otherwise).
    #[arg(long)]
    max_iterations: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DeviceChoice {
    Android,
    Ios,
    Both,
}

impl DeviceChoice {
    fn devices(self) -> &'static [DeviceKind] {
        match self {
            Self::Android => &[DeviceKind::Android],
            Self::Ios => &[DeviceKind::Ios],
            Self::Both => &DeviceKind::ALL,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Fields(args) => cmd_fields(args),
        Command::Contrast(args) => cmd_contrast(args),
        Command::Watch(args) => cmd_watch(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build a session from the CLI inputs. A manifest that fails to parse is fatal here;
/// only `watch` tolerates broken edits.
fn load_session(source: &SourceArgs) -> anyhow::Result<PreviewSession> {
    let mut session = PreviewSession::new();
    if let Some(path) = &source.manifest {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        if !session.set_manifest_text(&text) {
            anyhow::bail!(
                "parse manifest '{}': {}",
                path.display(),
                session.error().unwrap_or("invalid JSON")
            );
        }
    }
    if let Some(path) = &source.icon {
        session.upload_icon(UploadedIcon::from_path(path)?);
    }
    Ok(session)
}

fn render_opts(output: &OutputArgs, manifest: Option<&Path>) -> RenderOpts {
    let defaults = RenderOpts::default();
    RenderOpts {
        scale: output.scale,
        resources_dir: output.resources_dir.clone().or_else(|| {
            manifest
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        }),
        backdrop: if output.transparent {
            None
        } else {
            defaults.backdrop.clone()
        },
        ..defaults
    }
}

fn write_output(
    output: &OutputArgs,
    fields: &DisplayFields<'_>,
    opts: &RenderOpts,
) -> anyhow::Result<()> {
    let devices = output.device.devices();
    let out = &output.out;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let is_svg = out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let svg = splashmock::render_svg(devices, fields, opts)?;
        std::fs::write(out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
    } else {
        let png = splashmock::render_png(devices, fields, opts)?;
        std::fs::write(out, png).with_context(|| format!("write png '{}'", out.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = load_session(&args.source)?;
    let opts = render_opts(&args.output, args.source.manifest.as_deref());
    write_output(&args.output, &session.display_fields(), &opts)?;

    eprintln!("wrote {}", args.output.out.display());
    Ok(())
}

fn cmd_fields(args: SourceArgs) -> anyhow::Result<()> {
    let session = load_session(&args)?;
    let json = serde_json::to_string_pretty(&session.display_fields())
        .context("serialize display fields")?;
    println!("{json}");
    Ok(())
}

fn cmd_contrast(args: ContrastArgs) -> anyhow::Result<()> {
    for color in &args.colors {
        println!("{color}\t{}", splashmock::resolve_contrast(Some(color)));
    }
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let opts = render_opts(&args.output, Some(&args.manifest));
    let interval = Duration::from_millis(args.interval_ms.max(10));

    let mut session = PreviewSession::new();
    let mut manifest_seen: Option<SystemTime> = None;
    let mut icon_seen: Option<SystemTime> = None;
    let mut polls = 0u64;

    loop {
        let mut dirty = false;

        if let Some(mtime) = modified(&args.manifest).filter(|m| Some(*m) != manifest_seen) {
            manifest_seen = Some(mtime);
            match std::fs::read_to_string(&args.manifest) {
                Ok(text) if session.set_manifest_text(&text) => dirty = true,
                Ok(_) => {
                    let err = session.error().unwrap_or("invalid JSON");
                    tracing::warn!(error = err, "manifest does not parse; keeping last good preview");
                    eprintln!("error: {err}");
                }
                Err(e) => tracing::warn!(error = %e, path = %args.manifest.display(), "read manifest"),
            }
        }

        if let Some(path) = &args.icon {
            if let Some(mtime) = modified(path).filter(|m| Some(*m) != icon_seen) {
                icon_seen = Some(mtime);
                match UploadedIcon::from_path(path) {
                    Ok(icon) => {
                        session.upload_icon(icon);
                        dirty = true;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "icon not usable; keeping previous upload");
                        eprintln!("error: {e}");
                    }
                }
            }
        }

        if dirty {
            match write_output(&args.output, &session.display_fields(), &opts) {
                Ok(()) => eprintln!("wrote {}", args.output.out.display()),
                Err(e) => {
                    tracing::warn!(error = %e, "render failed; keeping previous output");
                    eprintln!("error: {e:#}");
                }
            }
        }

        polls += 1;
        if args.max_iterations.is_some_and(|max| polls >= max) {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
