mod extract;
mod titles;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use thiserror::Error;

use rglpak_codec::{KeyError, TitleError};

/// Decodes RPF7 launcher packages and RGLM title descriptors.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Root of the launcher installation; triggers extraction mode.
    #[arg(long)]
    rgl: Option<PathBuf>,

    /// Directory containing .rgl files; triggers title-decryption mode. Wins over --rgl
    /// if both are supplied.
    #[arg(long)]
    titles: Option<PathBuf>,

    /// Output directory, created if missing. Required by whichever mode runs.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Title(#[from] TitleError),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

fn main() {
    tracing_subscriber::fmt().compact().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args = Args::parse();

    // No mode selected, or the selected mode is missing its required --out: print usage
    // and exit successfully, same as the source tool's `parseParams` returning nil.
    let result = match (&args.titles, &args.rgl, &args.out) {
        (Some(titles_dir), _, Some(out)) => titles::run(titles_dir, out).map_err(CliError::from),
        (None, Some(install_root), Some(out)) => extract::run(install_root, out).map_err(CliError::from),
        _ => {
            Args::command().print_help().ok();
            println!();
            std::process::exit(exitcode::OK);
        }
    };

    if let Err(err) = result {
        tracing::error!(%err, "rglpak failed");
        std::process::exit(exit_code_for(&err));
    }
}

fn exit_code_for(err: &CliError) -> exitcode::ExitCode {
    match err {
        CliError::Key(_) => exitcode::DATAERR,
        CliError::Title(_) => exitcode::DATAERR,
        CliError::Io(_) => exitcode::IOERR,
    }
}
