use std::path::PathBuf;

use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};

/// Default bit rate of the PDM stream, DSD64 (64 × 44.1 kHz).
pub const DEFAULT_BIT_RATE: u32 = 2_822_400;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ")\ndsf library: ",
    env!("DSF_VERSION"),
    "\nbuilt: ",
    env!("BUILD_TIMESTAMP"),
);

#[derive(Debug, ClapParser)]
#[command(
    name         = env!("CARGO_PKG_NAME"),
    version      = env!("CARGO_PKG_VERSION"),
    long_version = LONG_VERSION,
    author       = env!("CARGO_PKG_AUTHORS"),
    about        = "Convert raw PDM bitstreams into DSD Stream Files (DSF)",
    long_about   = None,
)]
pub struct Cli {
    /// Set the log level [default: info, or RUST_LOG when set]
    #[arg(long, global = true, value_enum)]
    pub loglevel: Option<LogLevel>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Show progress bars during operations.
    #[arg(long, global = true)]
    pub progress: bool,

    /// Choose an operation to perform.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Wrap the specified PDM bitstream in a DSF container.
    Encode(EncodeArgs),

    /// Print stream information and the resulting DSF layout
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Input raw PDM bitstream (use "-" for stdin).
    #[arg(value_name = "PDMFILE")]
    pub input: PathBuf,

    /// Output DSF file.
    #[arg(short, long, value_name = "PATH", default_value = "out.dsf")]
    pub output: PathBuf,

    /// PDM/DSF bit rate in bits per second.
    #[arg(
        short = 'r',
        long,
        value_name = "RATE",
        default_value_t = DEFAULT_BIT_RATE,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub bit_rate: u32,

    /// Also write a YAML summary of the stream layout to this path.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Input raw PDM bitstream (use "-" for stdin).
    #[arg(value_name = "PDMFILE")]
    pub input: PathBuf,

    /// PDM/DSF bit rate in bits per second.
    #[arg(
        short = 'r',
        long,
        value_name = "RATE",
        default_value_t = DEFAULT_BIT_RATE,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub bit_rate: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors.
    Warn,
    /// Show info, warnings and errors (default).
    Info,
    /// Show debug, info, warnings and errors.
    Debug,
    /// Show all log messages including trace.
    Trace,
}

impl LogLevel {
    /// Level filter to force on the logger. `None` leaves the `RUST_LOG`
    /// directives in charge.
    pub fn effective_filter(
        requested: Option<LogLevel>,
        rust_log_set: bool,
    ) -> Option<log::LevelFilter> {
        match requested {
            Some(level) => Some(level.to_level_filter()),
            None if rust_log_set => None,
            None => Some(log::LevelFilter::Info),
        }
    }

    /// Convert LogLevel to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Colorized human-readable text.
    Plain,
    /// Structured JSON per log record.
    Json,
}
