//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `runcheck`.
#[derive(Debug, Parser)]
#[command(name = "runcheck", version, about = "Locate runfiles and verify generated artifacts")]
pub struct Cli {
    /// How to find runfiles.
    #[command(flatten)]
    pub runfiles: RunfilesArgs,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options selecting the runfiles source; without them runfiles are
/// discovered from the environment.
#[derive(Debug, Default, Args)]
pub struct RunfilesArgs {
    /// Use this runfiles manifest.
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
    /// Use this runfiles directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub runfiles_dir: Option<PathBuf>,
    /// Discover runfiles the way a test does (also checks `TEST_SRCDIR`).
    #[arg(long, global = true)]
    pub for_test: bool,
    /// Suffix appended to executable artifacts.
    #[arg(long, global = true, value_name = "SUFFIX")]
    pub exe_suffix: Option<String>,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify artifacts against an expectation file.
    Verify {
        /// YAML expectation file.
        file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the absolute path of each logical path.
    Resolve {
        /// Logical paths such as `rules_flex/tests/genrule_output.c`.
        #[arg(required = true)]
        paths: Vec<String>,
        /// Append the executable suffix before resolving.
        #[arg(long)]
        executable: bool,
    },
    /// Print environment variables that expose the runfiles to a child process.
    Env,
}
