#![forbid(unsafe_code)]

//! Command-line argument parsing for the customer form demo.
//!
//! Parses args manually. Supports environment variable overrides via the
//! `CFORM_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
cform-demo: scripted session against the customer form model

USAGE:
    cform-demo [OPTIONS]

OPTIONS:
    --sample             Load the sample customer instead of typing one in
    --debounce-ms=N      Quiet window for the email message (default: 1000)
    --help, -h           Show this help message
    --version, -V        Show version

The session runs on a synthetic clock and prints the submitted values as
JSON on stdout. Logs go to stderr.

ENVIRONMENT VARIABLES:
    CFORM_LOG             Log filter directive (default: info)
    CFORM_DEBOUNCE_MS     Override --debounce-ms default";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Load the sample customer.
    pub sample: bool,
    /// Email message quiet window in milliseconds.
    pub debounce_ms: u64,
    /// `tracing` filter directive.
    pub log: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            sample: false,
            debounce_ms: 1000,
            log: "info".into(),
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("CFORM_LOG") {
            opts.log = val;
        }
        if let Ok(val) = env::var("CFORM_DEBOUNCE_MS")
            && let Ok(n) = val.parse()
        {
            opts.debounce_ms = n;
        }

        match opts.apply_args(env::args().skip(1)) {
            Ok(Some(exit_text)) => {
                println!("{exit_text}");
                process::exit(0);
            }
            Ok(None) => opts,
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Apply flags on top of `self`. Returns text to print and exit with for
    /// `--help` and `--version`.
    fn apply_args(
        &mut self,
        args: impl IntoIterator<Item = String>,
    ) -> Result<Option<String>, String> {
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Some(HELP_TEXT.to_string())),
                "--version" | "-V" => return Ok(Some(format!("cform-demo {VERSION}"))),
                "--sample" => self.sample = true,
                other => {
                    if let Some(val) = other.strip_prefix("--debounce-ms=") {
                        self.debounce_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --debounce-ms value: {val}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }
        Ok(None)
    }
}
