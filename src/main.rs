use std::{io, path::PathBuf, process};

use clap::{Parser, error::ErrorKind};
use partygif::{Config, Error, config::stream_path};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PARTYGIF_LOG";

const EXAMPLES: &str = "Examples:
  partygif --in cat.gif --out party-cat.gif          One hue cycle across the animation.
  partygif --cycles 3 < in.gif > out.gif             Three cycles, standard streams.
  partygif --in logo.gif --repeats 4 --framerate 5   Static image, four fast replays.
  partygif --in bw.gif --black --out color.gif       Colorize a black-and-white source.";

#[derive(Debug, Parser)]
#[command(name = "partygif", version)]
#[command(about = "Cycle the colors of a GIF by rotating each frame's palette hue")]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Input GIF file (default: standard input)
    #[arg(long = "in", value_name = "FILE")]
    input: Option<String>,

    /// Output GIF file (default: standard output)
    #[arg(long = "out", value_name = "FILE")]
    output: Option<String>,

    /// Number of color cycles during the GIF
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    cycles: i32,

    /// Number of times to repeat the GIF before color shifting
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    repeats: i32,

    /// Frame delay in 100ths of a second for static GIFs
    #[arg(long = "framerate", default_value_t = 10)]
    frame_rate: u16,

    /// Add color to a black and white image before color shifting
    #[arg(long = "black", visible_alias = "colorize")]
    colorize: bool,

    /// Print internal diagnostics to stderr
    #[arg(short = 'D', long)]
    debug: bool,

    #[arg(hide = true)]
    positional: Vec<String>,
}

impl Cli {
    fn into_config(self) -> Result<Config, Error> {
        if !self.positional.is_empty() {
            return Err(Error::UnexpectedArguments);
        }
        Ok(Config {
            input: stream_path(self.input.map(PathBuf::from)),
            output: stream_path(self.output.map(PathBuf::from)),
            cycles: self.cycles,
            repeats: self.repeats,
            frame_rate: self.frame_rate,
            colorize: self.colorize,
        })
    }
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return match err.print() {
                Ok(()) => 0,
                Err(_) => 1,
            };
        }
        Err(err) => return report(&Error::Usage(usage_summary(&err))),
    };

    init_logging(cli.debug);

    let config = match cli.into_config() {
        Ok(cfg) => cfg,
        Err(err) => return report(&err),
    };
    debug!(?config, "configuration");

    match partygif::run(&config) {
        Ok(()) => 0,
        Err(err) => report(&err),
    }
}

fn report(err: &Error) -> i32 {
    eprintln!("partygif: error: {err}");
    1
}

/// First line of a clap error, without clap's own `error: ` prefix.
fn usage_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
