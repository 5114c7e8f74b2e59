//! `runcheck resolve` command.

use std::io::Write;

use crate::config::Config;
use crate::context::ServiceContext;

/// Execute the `resolve` command: print one absolute path per logical path.
///
/// # Errors
///
/// Returns an error string on the first path that cannot be resolved.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &Config,
    paths: &[String],
    executable: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let runfiles = config.open_runfiles(ctx).map_err(|e| e.to_string())?;
    for path in paths {
        let logical = if executable {
            config.executable_path(path)
        } else {
            path.clone()
        };
        let resolved = runfiles.rlocation(&logical).map_err(|e| e.to_string())?;
        super::write_line(out, &resolved.display().to_string())?;
    }
    Ok(())
}
