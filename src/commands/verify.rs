//! `runcheck verify` command.

use std::io::Write;
use std::path::Path;

use crate::cli::Format;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::verify::{format_report, ExpectationSet, Verifier};

/// Execute the `verify` command.
///
/// The report is written to `out` whether or not checks pass.
///
/// # Errors
///
/// Returns an error string if the expectation file or runfiles cannot be
/// loaded, or if any check fails.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &Config,
    file: &Path,
    format: Format,
    out: &mut dyn Write,
) -> Result<(), String> {
    let set = ExpectationSet::load(ctx.fs.as_ref(), file).map_err(|e| e.to_string())?;
    let runfiles = config.open_runfiles(ctx).map_err(|e| e.to_string())?;
    let verifier = Verifier::with_config(ctx, &runfiles, config);

    let report = verifier.verify_all(&set);
    let rendered = match format {
        Format::Text => format_report(&report),
        Format::Json => report
            .to_json()
            .map_err(|e| format!("Failed to render report: {e}"))?,
    };
    super::write_line(out, &rendered)?;

    let failed = report.failures().len();
    if failed > 0 {
        return Err(format!("{failed} of {} checks failed", report.results.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::adapters::memory::{MemoryEnvironment, MemoryFileSystem};

    const EXPECTATIONS: &str = r#"
artifacts:
  - path: rules_flex/tests/genrule_flex_cc.cc
    checks:
      - type: contains
        substrings:
          - "/* A lexical scanner generated by flex */"
          - "void yyFlexLexer::yyrestart"
  - path: rules_flex/tests/hello_cc_bin
    executable: true
    checks:
      - type: non_empty
"#;

    fn context(cc_source: &str) -> ServiceContext {
        let fs = MemoryFileSystem::new();
        fs.add_file("/checks/flex.yaml", EXPECTATIONS);
        fs.add_file("/rf/rules_flex/tests/genrule_flex_cc.cc", cc_source);
        fs.add_file("/rf/rules_flex/tests/hello_cc_bin", vec![0x7f, b'E', b'L', b'F']);
        ServiceContext::in_memory(fs, MemoryEnvironment::new())
    }

    fn config() -> Config {
        Config {
            exe_suffix: String::new(),
            runfiles_dir: Some(PathBuf::from("/rf")),
            ..Config::default()
        }
    }

    fn verify(
        ctx: &ServiceContext,
        file: &str,
        format: Format,
        out: &mut Vec<u8>,
    ) -> Result<(), String> {
        run_with_context(ctx, &config(), Path::new(file), format, out)
    }

    #[test]
    fn passing_run_prints_report() {
        let ctx = context(
            "/* A lexical scanner generated by flex */\n\
             void yyFlexLexer::yyrestart( std::istream& input_file )",
        );
        let mut out = Vec::new();

        verify(&ctx, "/checks/flex.yaml", Format::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[PASS] contains rules_flex/tests/genrule_flex_cc.cc"));
        assert!(text.contains("[PASS] non-empty rules_flex/tests/hello_cc_bin"));
        assert!(text.contains("Result: PASSED"));
    }

    #[test]
    fn failing_run_prints_report_and_errors() {
        let ctx = context("/* A lexical scanner generated by flex */");
        let mut out = Vec::new();

        let err = verify(&ctx, "/checks/flex.yaml", Format::Json, &mut out).unwrap_err();
        assert_eq!(err, "1 of 2 checks failed");

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["results"][0]["passed"], false);
        let detail = value["results"][0]["detail"].as_str().unwrap();
        assert!(detail.contains("void yyFlexLexer::yyrestart"));
    }

    #[test]
    fn missing_expectation_file_errors() {
        let ctx = context("");
        let err = verify(&ctx, "/checks/none.yaml", Format::Text, &mut Vec::new()).unwrap_err();
        assert!(err.contains("/checks/none.yaml"));
    }
}
