use anyhow::{Context, Result};
use best_stats::{run, Config, Mode};
use clap::{Parser, ValueEnum};
use std::{path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "No output has been defined. Please choose one:
    - show: the animation is displayed on the screen
    - save: the animation is saved as a gif file";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputMode {
    /// Display the animation in a window
    Show,
    /// Save the animation as a timestamped GIF
    Save,
}

impl From<OutputMode> for Mode {
    fn from(m: OutputMode) -> Self {
        match m {
            OutputMode::Show => Mode::Show,
            OutputMode::Save => Mode::Save,
        }
    }
}

/// Replay of "The best stats you've ever seen": fertility vs life expectancy, 1960-2016
#[derive(Parser, Debug)]
#[command(name = "best-stats")]
struct Args {
    /// Where to send the animation
    #[arg(value_enum)]
    mode: Option<OutputMode>,

    /// Directory holding the four World Bank CSV files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory the GIF is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// YAML file overriding the built-in settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let Some(mode) = args.mode else {
        println!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    // ─── init logging ────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,best_stats=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── configure ───────────────────────────────────────────────────
    let mut cfg = match &args.config {
        Some(path) => Config::load(path).context("loading config")?,
        None => Config::default(),
    };
    if let Some(dir) = args.data_dir {
        cfg.data_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        cfg.output_dir = dir;
    }

    run(mode.into(), &cfg)?;
    info!("all done");
    Ok(ExitCode::SUCCESS)
}
