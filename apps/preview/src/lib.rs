//! # Folio Preview Library
//!
//! Reads an invoice or quotation saved by the form, recomputes its totals
//! and renders a preview.
//!
//! ## Module Organization
//! ```text
//! folio_preview_lib/
//! ├── lib.rs          ◄─── You are here (argument handling & run)
//! ├── config.rs       ◄─── FOLIO_* environment configuration
//! ├── render.rs       ◄─── Text and JSON output
//! └── error.rs        ◄─── AppError and exit codes
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments ──► path (or stdin), --json / --text, --strict     │
//! │  2. Read document JSON                                                  │
//! │  3. Document::from_json ──► totals recomputed, stored ones ignored     │
//! │  4. Apply config fallbacks (currency, company name)                    │
//! │  5. Strict mode? ──► validate_document                                 │
//! │  6. Render text or JSON                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod render;

use std::io::Read;
use std::path::PathBuf;

use folio_core::{validation, Document};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub use config::{OutputFormat, PreviewConfig};
pub use error::{AppError, AppResult};

pub const USAGE: &str = "folio [PATH | -] [--json | --text] [--strict]";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    /// Document file; `None` reads stdin.
    pub path: Option<PathBuf>,
    pub output: Option<OutputFormat>,
    pub strict: bool,
    pub help: bool,
}

impl Args {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Args::default();

        for arg in args {
            match arg.as_ref() {
                "--json" => parsed.output = Some(OutputFormat::Json),
                "--text" => parsed.output = Some(OutputFormat::Text),
                "--strict" => parsed.strict = true,
                "--help" | "-h" => parsed.help = true,
                "-" => parsed.path = None,
                flag if flag.starts_with("--") => {
                    return Err(AppError::Usage(format!("unknown flag {flag}")));
                }
                path => {
                    if parsed.path.is_some() {
                        return Err(AppError::Usage("only one document path allowed".to_string()));
                    }
                    parsed.path = Some(PathBuf::from(path));
                }
            }
        }

        Ok(parsed)
    }
}

/// Runs one preview and returns what should be printed.
///
/// `stdin` is only read when no path was given.
pub fn run<R: Read>(args: &Args, config: &PreviewConfig, mut stdin: R) -> AppResult<String> {
    if args.help {
        return Ok(format!("Usage: {USAGE}\n"));
    }

    let json = match &args.path {
        Some(path) => {
            debug!(path = %path.display(), "Reading document file");
            std::fs::read_to_string(path)?
        }
        None => {
            debug!("Reading document from stdin");
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };

    let mut doc = Document::from_json(&json)?;
    apply_fallbacks(&mut doc, config);

    info!(
        number = %doc.number,
        kind = ?doc.kind,
        items = doc.items().len(),
        grand_total = doc.totals().grand_total,
        "Document loaded"
    );

    if args.strict || config.strict {
        if let Err(err) = validation::validate_document(&doc) {
            warn!(error = %err, "Strict validation failed");
            return Err(err.into());
        }
        debug!("Strict validation passed");
    }

    match args.output.unwrap_or(config.output) {
        OutputFormat::Text => Ok(render::render_text(&doc)),
        OutputFormat::Json => render::render_json(&doc),
    }
}

/// Fills blanks the form left in the document from configuration.
fn apply_fallbacks(doc: &mut Document, config: &PreviewConfig) {
    if doc.currency_code.trim().is_empty() {
        debug!(currency = %config.default_currency, "Using default currency");
        doc.set_currency(config.default_currency.clone());
    }

    if doc.company.name.trim().is_empty() {
        if let Some(name) = &config.company_name {
            doc.company.name = name.clone();
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=folio_preview_lib=trace` - Trace this crate only
/// - Default: WARN, so previews piped to other tools stay clean
///
/// Logs go to stderr; stdout carries only the rendered output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
