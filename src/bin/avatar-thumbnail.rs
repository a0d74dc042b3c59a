use std::{
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use avatar_thumbnail::{EnvConfig, ImageResponse, Pipeline, RenderEvent};

#[derive(Parser, Debug)]
#[command(name = "avatar-thumbnail", version)]
struct Cli {
    /// Log verbosity (written to stderr).
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a render event as JSON and print the image response as JSON.
    Handle(HandleArgs),
    /// Render one thumbnail to a PNG file.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct HandleArgs {
    /// Event JSON file (`{"AvatarJSON": ..., "Size": ...}`). Reads stdin when omitted.
    #[arg(long)]
    event: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Avatar description JSON. Empty or omitted renders the default avatar.
    #[arg(long, conflicts_with = "json_file")]
    json: Option<String>,

    /// File containing the avatar description JSON.
    #[arg(long)]
    json_file: Option<PathBuf>,

    /// Output size before supersampling; the PNG is three times larger.
    #[arg(long, default_value_t = 512)]
    size: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Handle(args) => cmd_handle(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn pipeline() -> anyhow::Result<Pipeline<avatar_thumbnail::SubprocessExporter>> {
    let cfg = EnvConfig::from_env()?;
    Ok(Pipeline::from_config(&cfg))
}

fn cmd_handle(args: HandleArgs) -> anyhow::Result<()> {
    let raw = match &args.event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read event '{}'", path.display()))?,
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("read event from stdin")?;
            s
        }
    };
    let event: RenderEvent = serde_json::from_str(&raw).context("parse render event JSON")?;

    let resp = pipeline()?.handle(&event)?;
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let description = match (&args.json, &args.json_file) {
        (Some(s), _) => s.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read avatar description '{}'", path.display()))?,
        (None, None) => String::new(),
    };

    let resp = pipeline()?.handle(&RenderEvent::new(description, args.size))?;
    write_png(&resp, &args.out)?;

    println!("{}", resp.content_id());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_png(resp: &ImageResponse, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, resp.png_bytes()?)
        .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
