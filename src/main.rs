use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use verexport::{export, Config, Verbosity};

/// Export a version-scoped snapshot of the project.
///
/// Copies the project's roots into DIR, dropping lines inside
/// `#if VERSION <op> N` ... `#endif VERSION` guards that do not hold for VERSION,
/// and records VERSION in DIR/.version.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// The version to export
    #[arg(value_name = "VERSION", allow_negative_numbers = true)]
    export_version: i64,

    /// The directory to export into
    dir: PathBuf,

    /// The project root to export from
    #[arg(short = 'C', long, default_value = ".")]
    base_dir: PathBuf,

    /// Overwrite DIR without asking if it already exists
    #[arg(short, long)]
    yes: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print every file and directory being exported
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mut config = Config::new(cli.export_version, cli.dir);
        config.base_dir = cli.base_dir;
        config.verbosity = if cli.quiet {
            Verbosity::Quiet
        } else if cli.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        if cli.yes {
            config.confirm = Arc::new(|_: &Path| true);
        }
        config
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    match export(cli.into()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
