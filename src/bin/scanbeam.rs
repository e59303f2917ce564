use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scanbeam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply the scanline effect to a single image.
    Frame(FrameArgs),
    /// Print the default configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input image (any format `image` can decode).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Effect configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Previous frame, used to fill wrong-field lines when weaving.
    #[arg(long)]
    previous: Option<PathBuf>,

    /// Frame counter driving interlaced field selection.
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output width; requires `--height`.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height; requires `--width`.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Worker threads for the scanline pass.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Write to this path instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn read_rgb(path: &Path) -> anyhow::Result<image::RgbImage> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img.to_rgb8())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => scanbeam::CrtConfig::from_path(path)?,
        None => scanbeam::CrtConfig::default(),
    };
    let renderer = scanbeam::FrameRenderer::new(
        config,
        scanbeam::RenderOpts {
            threads: args.threads,
        },
    )?;

    let input = read_rgb(&args.in_path)?;
    let previous = args.previous.as_deref().map(read_rgb).transpose()?;
    let out_size = match (args.width, args.height) {
        (Some(width), Some(height)) => Some(scanbeam::OutputSize { width, height }),
        _ => None,
    };

    let frame = renderer.render_frame(&input, previous.as_ref(), args.frame, out_size)?;

    ensure_parent(&args.out)?;
    frame
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let json = scanbeam::CrtConfig::default().to_json_pretty()?;
    match args.out {
        Some(path) => {
            ensure_parent(&path)?;
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("write config '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
