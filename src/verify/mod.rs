//! Artifact verification.
//!
//! Resolves each artifact through a [`Runfiles`], reads it fully into memory
//! without newline translation, and checks its content. Each call is
//! independent: the bytes are dropped before the call returns, and repeated
//! calls on an unchanged artifact give the same outcome.

pub mod expectation;
pub mod report;

pub use expectation::{Check, Expectation, ExpectationSet};
pub use report::{format_report, CheckResult, Operation, VerificationReport};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::VerifyError;
use crate::runfiles::Runfiles;

/// Checks artifacts resolved through a borrowed resolver.
pub struct Verifier<'a> {
    ctx: &'a ServiceContext,
    runfiles: &'a Runfiles,
    config: Config,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier with the host's executable suffix.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, runfiles: &'a Runfiles) -> Self {
        Self::with_config(ctx, runfiles, &Config::default())
    }

    /// Creates a verifier using the suffix from `config`.
    #[must_use]
    pub fn with_config(
        ctx: &'a ServiceContext,
        runfiles: &'a Runfiles,
        config: &Config,
    ) -> Self {
        Self {
            ctx,
            runfiles,
            config: config.clone(),
        }
    }

    /// Asserts that every substring occurs in the artifact. Order does not
    /// matter.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::ContentMismatch`] naming the first missing
    /// substring (in the order given), or a resolve/read error.
    pub fn verify_text_contains(
        &self,
        path: &str,
        substrings: &[&str],
    ) -> Result<(), VerifyError> {
        let content = self.read(path)?;
        if let Some(missing) = substrings.iter().find(|s| !contains(&content, s.as_bytes())) {
            return Err(VerifyError::ContentMismatch {
                path: path.to_string(),
                missing: (*missing).to_string(),
            });
        }
        Ok(())
    }

    /// Asserts that the artifact is at least one byte long.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::EmptyArtifact`] for a zero-byte artifact, or a
    /// resolve/read error.
    pub fn verify_non_empty(&self, path: &str) -> Result<(), VerifyError> {
        if self.read(path)?.is_empty() {
            return Err(VerifyError::EmptyArtifact {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    /// Runs every check of one expectation and reports each outcome.
    #[must_use]
    pub fn verify_expectation(&self, expectation: &Expectation) -> Vec<CheckResult> {
        let path = if expectation.executable {
            self.config.executable_path(&expectation.path)
        } else {
            expectation.path.clone()
        };

        expectation
            .checks
            .iter()
            .map(|check| {
                let (operation, outcome) = match check {
                    Check::Contains { substrings } => {
                        let substrings: Vec<&str> =
                            substrings.iter().map(String::as_str).collect();
                        (
                            Operation::Contains,
                            self.verify_text_contains(&path, &substrings),
                        )
                    }
                    Check::NonEmpty => (Operation::NonEmpty, self.verify_non_empty(&path)),
                };
                let passed = outcome.is_ok();
                let detail = match outcome {
                    Ok(()) => String::new(),
                    Err(err) => {
                        tracing::warn!(
                            path = %path,
                            operation = operation.name(),
                            error = %err,
                            "check failed"
                        );
                        err.to_string()
                    }
                };
                CheckResult {
                    path: path.clone(),
                    operation,
                    passed,
                    detail,
                }
            })
            .collect()
    }

    /// Runs every expectation in the set. A failing artifact does not stop
    /// the remaining ones from being checked.
    #[must_use]
    pub fn verify_all(&self, set: &ExpectationSet) -> VerificationReport {
        let checked_at = self.ctx.clock.now();
        let results: Vec<CheckResult> = set
            .artifacts
            .iter()
            .flat_map(|e| self.verify_expectation(e))
            .collect();
        tracing::info!(
            checks = results.len(),
            failed = results.iter().filter(|r| !r.passed).count(),
            "verification finished"
        );
        VerificationReport { checked_at, results }
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, VerifyError> {
        let resolved = self.runfiles.rlocation(path)?;
        self.ctx.fs.read(&resolved).map_err(|source| VerifyError::Read {
            logical: path.to_string(),
            path: resolved,
            source,
        })
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}
