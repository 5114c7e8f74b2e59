//! `runcheck env` command.

use std::io::Write;

use crate::config::Config;
use crate::context::ServiceContext;

/// Execute the `env` command: print `KEY=VALUE` lines a child process can
/// use to find the same runfiles.
///
/// # Errors
///
/// Returns an error string if runfiles cannot be located.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), String> {
    let runfiles = config.open_runfiles(ctx).map_err(|e| e.to_string())?;
    for (key, value) in runfiles.env_vars() {
        super::write_line(out, &format!("{key}={value}"))?;
    }
    Ok(())
}
