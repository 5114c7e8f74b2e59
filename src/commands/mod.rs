//! Command dispatch and handlers.

pub mod env;
pub mod resolve;
pub mod verify;

use std::io::Write;

use crate::cli::{Cli, Command, RunfilesArgs};
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command line to its handler using live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let ctx = ServiceContext::live();
    let config = config_for(&ctx, &cli.runfiles);
    let mut stdout = std::io::stdout().lock();
    dispatch_with_context(&cli.command, &ctx, &config, &mut stdout)
}

/// Dispatch a command with the given service context and configuration,
/// writing command output to `out`.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::Verify { file, format } => {
            verify::run_with_context(ctx, config, file, *format, out)
        }
        Command::Resolve { paths, executable } => {
            resolve::run_with_context(ctx, config, paths, *executable, out)
        }
        Command::Env => env::run_with_context(ctx, config, out),
    }
}

/// Builds the configuration from the environment, then applies flags.
#[must_use]
pub fn config_for(ctx: &ServiceContext, args: &RunfilesArgs) -> Config {
    let mut config = Config::from_env(ctx.env.as_ref());
    config.manifest.clone_from(&args.manifest);
    config.runfiles_dir.clone_from(&args.runfiles_dir);
    config.for_test = args.for_test;
    if let Some(suffix) = &args.exe_suffix {
        config.exe_suffix.clone_from(suffix);
    }
    config
}

pub(crate) fn write_line(out: &mut dyn Write, line: &str) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|e| format!("Failed to write output: {e}"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::adapters::memory::{MemoryEnvironment, MemoryFileSystem};

    #[test]
    fn flags_override_environment() {
        let env = MemoryEnvironment::new().with_var("RUNCHECK_EXE_SUFFIX", ".bin");
        let ctx = ServiceContext::in_memory(MemoryFileSystem::new(), env);

        let from_env = config_for(&ctx, &RunfilesArgs::default());
        assert_eq!(from_env.exe_suffix, ".bin");

        let args = RunfilesArgs {
            manifest: Some(PathBuf::from("/rf/MANIFEST")),
            exe_suffix: Some(".exe".to_string()),
            for_test: true,
            ..RunfilesArgs::default()
        };
        let config = config_for(&ctx, &args);
        assert_eq!(config.exe_suffix, ".exe");
        assert_eq!(config.manifest, Some(PathBuf::from("/rf/MANIFEST")));
        assert!(config.for_test);
    }

    #[test]
    fn dispatches_env_command() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/rf");
        let env = MemoryEnvironment::new().with_var("RUNFILES_DIR", "/rf");
        let ctx = ServiceContext::in_memory(fs, env);
        let mut out = Vec::new();

        dispatch_with_context(&Command::Env, &ctx, &Config::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "RUNFILES_DIR=/rf\nJAVA_RUNFILES=/rf\n");
    }
}
