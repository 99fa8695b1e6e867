use std::{fs::File, io, path::PathBuf, process::ExitCode};

use clap::{error::ErrorKind, Parser};
use thiserror::Error;

use hexcat::{options::DumpOptionsBuilder, Dumper};

#[derive(Parser, Debug)]
#[command(name = "hexcat", version, about = "print a hex dump of a binary file")]
struct Cli {
    /// Dump at most LEN bytes of the file. A LEN that does not parse as a
    /// number is treated as 0.
    #[arg(short = 'n', value_name = "LEN", value_parser = parse_limit)]
    limit: Option<u64>,

    /// File to dump, opened for raw binary reading.
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

/// Lenient atoi-style parse: anything that is not a non-negative
/// integer counts as 0.
fn parse_limit(s: &str) -> Result<u64, std::convert::Infallible> {
    Ok(s.parse().unwrap_or(0))
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not open file {}: {}", path.display(), source)]
    Open { path: PathBuf, source: io::Error },
    #[error("error while dumping {}: {}", path.display(), source)]
    Dump { path: PathBuf, source: io::Error },
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file = File::open(&cli.file).map_err(|source| CliError::Open {
        path: cli.file.clone(),
        source,
    })?;

    Dumper::new(file)
        .maybe_limit(cli.limit)
        .dump_io(io::stdout().lock())
        .map_err(|source| CliError::Dump {
            path: cli.file,
            source,
        })
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
