use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{error, info};

use mmukit::runner::{self, Outcome};
use mmukit_settings::Config;

#[derive(Parser, Debug)]
#[command(
    name = "mmukit",
    version,
    about = "Inject MMU metadata into slicer-produced gcode files"
)]
struct Cli {
    /// Gcode files to process in place
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Substitute MMU metadata placeholders (overrides config)
    #[arg(short = 'm', long = "placeholders", action = ArgAction::SetTrue, overrides_with = "no_placeholders")]
    placeholders: bool,

    /// Leave placeholder tokens untouched (overrides config)
    #[arg(long = "no-placeholders", action = ArgAction::SetTrue)]
    no_placeholders: bool,

    /// Add the next toolhead position to tool changes (overrides config)
    #[arg(short = 'n', long = "nextpos", action = ArgAction::SetTrue, overrides_with = "no_nextpos")]
    nextpos: bool,

    /// Rewrite tool changes without a NEXT_POS hint (overrides config)
    #[arg(long = "no-nextpos", action = ArgAction::SetTrue)]
    no_nextpos: bool,

    /// Explicit config file (TOML or JSON)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = mmukit::init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load_or_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut settings = config.processing;
    if cli.placeholders {
        settings.insert_placeholders = true;
    } else if cli.no_placeholders {
        settings.insert_placeholders = false;
    }
    if cli.nextpos {
        settings.insert_next_pos = true;
    } else if cli.no_nextpos {
        settings.insert_next_pos = false;
    }

    info!("mmukit {} ({})", mmukit::VERSION, mmukit::BUILD_DATE);

    let mut rewritten = 0usize;
    let mut failures = 0usize;
    for path in &cli.files {
        match runner::process_file(path, &settings) {
            Ok(Outcome::Rewritten) => rewritten += 1,
            Ok(_) => {}
            Err(e) => {
                // One bad file must not stop the rest of the batch
                error!("Failed to process {}: {:#}", path.display(), e);
                failures += 1;
            }
        }
    }

    info!(
        "Processed {} files ({} rewritten, {} failed)",
        cli.files.len(),
        rewritten,
        failures
    );

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
