//! # Folio Preview Entry Point
//!
//! ## Usage
//! ```bash
//! # Text preview of a saved invoice
//! folio invoice.json
//!
//! # Totals as JSON, from stdin
//! cat quotation.json | folio --json
//!
//! # Refuse documents the form would silently coerce
//! FOLIO_STRICT=true folio invoice.json
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Load `FOLIO_*` configuration
//! 3. Parse arguments
//! 4. Run the preview and print it

use std::io::{self, Write};
use std::process::ExitCode;

use folio_preview_lib::{init_tracing, run, AppError, Args, PreviewConfig};
use tracing::{error, info};

fn main() -> ExitCode {
    init_tracing();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Preview failed");
            eprintln!("folio: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn try_main() -> Result<(), AppError> {
    let config = PreviewConfig::load()?;
    info!(
        currency = %config.default_currency,
        strict = config.strict,
        output = %config.output,
        "Configuration loaded"
    );

    let args = Args::parse(std::env::args().skip(1))?;
    let output = run(&args, &config, io::stdin().lock())?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
