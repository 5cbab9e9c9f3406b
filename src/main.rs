use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use roon_tagger::runtime::{self, RunOptions};

/// Fill in album, title, composer and album artist tags across a music library.
#[derive(Parser, Debug)]
#[command(name = "roon-tagger")]
#[command(version)]
struct Args {
    /// Directories to scan (replaces `scan.directories` from the config)
    roots: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, env = "ROON_TAGGER_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Number of files processed in parallel
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    workers: Option<u32>,

    /// Skip album lookups; use file names and overrides only
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let options = RunOptions {
        roots: args.roots,
        config: args.config,
        workers: args.workers.map(|n| n as usize),
        offline: args.offline,
    };

    match runtime::run(&options) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            eprintln!(
                "roon-tagger: {} of {} files failed",
                report.failed,
                report.total()
            );
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("roon-tagger: {e:#}");
            ExitCode::from(2)
        }
    }
}
