//! Runfile resolution and generated-artifact verification.
//!
//! [`runfiles::Runfiles`] maps logical, package-qualified paths to absolute
//! paths using a manifest or runfiles directory provided by the build
//! system. [`verify::Verifier`] reads the resolved artifacts and checks
//! their content.
//!
//! ```rust,ignore
//! use runcheck::context::ServiceContext;
//! use runcheck::runfiles::Runfiles;
//! use runcheck::verify::Verifier;
//!
//! let ctx = ServiceContext::live();
//! let runfiles = Runfiles::create_for_test(&ctx)?;
//! let verifier = Verifier::new(&ctx, &runfiles);
//! verifier.verify_text_contains(
//!     "rules_flex/tests/genrule_output.c",
//!     &["/* A lexical scanner generated by flex */", "void yyrestart"],
//! )?;
//! ```

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod runfiles;
pub mod verify;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| e.to_string());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
