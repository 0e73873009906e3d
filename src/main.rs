//! audiolog: summarize the health of a voice call audio pipeline from its log.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::Level;

use audiolog::{Config, LogStore, Report, Thresholds};

const USAGE_EXAMPLE: &str = "Example: audiolog voice_call.log";

#[derive(Debug, Parser)]
#[command(name = "audiolog")]
#[command(about = "Analyze audio capture, network and playback statistics in a voice call log")]
#[command(version)]
#[command(after_help = USAGE_EXAMPLE)]
struct Command {
    /// Increase diagnostic output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Log file to analyze
    log_file: PathBuf,
}

impl From<Command> for Config {
    fn from(opts: Command) -> Self {
        Config {
            verbosity: opts.verbose,
            log_path: opts.log_file,
            thresholds: Thresholds::default(),
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Analyze the configured log and print the report.
///
/// A log that cannot be opened or read is reported on stderr and the run
/// ends normally without a report.
fn run(config: Config) -> Result<()> {
    let store = match LogStore::from_path(&config.log_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Ok(());
        }
    };
    let report = Report::build(
        config.log_path.display().to_string(),
        &store,
        &config.thresholds,
    );
    print!("{report}");
    Ok(())
}

fn main() -> Result<()> {
    let opts = match Command::try_parse() {
        Ok(opts) => opts,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprint!("{e}");
            eprintln!("{USAGE_EXAMPLE}");
            process::exit(2);
        }
    };

    let config = Config::from(opts);
    init_logging(config.verbosity);
    run(config)
}
