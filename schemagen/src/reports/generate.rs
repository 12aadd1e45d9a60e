//! Generate and check report data structures.

use std::path::PathBuf;

use schemagen_codegen::pipeline::Diagnostic;

use super::output::{Output, Report};
use crate::ops::Mode;

/// Result of running every configured generator.
#[derive(Debug)]
pub struct GenerateReport {
    pub mode: Mode,
    /// One entry per generator, in config order.
    pub artifacts: Vec<ArtifactReport>,
}

/// Result of one generator.
#[derive(Debug)]
pub struct ArtifactReport {
    /// Generator name, e.g. `tables`.
    pub generator: &'static str,
    /// Output path; `None` when generation failed.
    pub path: Option<PathBuf>,
    pub outcome: Outcome,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub enum Outcome {
    Written,
    /// The file on disk already had this content.
    Unchanged,
    /// Dry run; holds the content that would be written.
    Preview(String),
    Checked,
    /// Rendered error report.
    Failed(String),
}

impl ArtifactReport {
    fn label(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => self.generator.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

impl GenerateReport {
    pub fn failed_count(&self) -> usize {
        self.artifacts.iter().filter(|a| a.is_failed()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.artifacts
            .iter()
            .flat_map(|a| &a.diagnostics)
            .filter(|d| d.severity.is_warning())
            .count()
    }

    /// Fail when any artifact failed.
    pub fn ensure_success(&self) -> eyre::Result<()> {
        let failed = self.failed_count();
        if failed > 0 {
            eyre::bail!("{} of {} artifacts failed", failed, self.artifacts.len());
        }
        Ok(())
    }

    fn summary(&self) -> String {
        let total = self.artifacts.len();
        let ok = total - self.failed_count();
        let verb = match self.mode {
            Mode::Write => "generated",
            Mode::DryRun => "would be generated",
            Mode::Check => "checked",
        };
        format!(
            "{} of {} artifacts {}, {} warnings",
            ok,
            total,
            verb,
            self.warning_count()
        )
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for artifact in &self.artifacts {
            let label = artifact.label();
            match &artifact.outcome {
                Outcome::Preview(content) => {
                    out.divider(&label);
                    out.preformatted(content);
                }
                Outcome::Written => out.added_item(&label),
                Outcome::Unchanged => out.unchanged_item(&label),
                Outcome::Checked => out.key_value(artifact.generator, &label),
                Outcome::Failed(report) => {
                    out.error(&format!("{} failed", artifact.generator));
                    out.preformatted(report);
                }
            }
            for diagnostic in &artifact.diagnostics {
                let msg = format!("{}: {}", label, diagnostic.message);
                if diagnostic.severity.is_warning() {
                    out.warning(&msg);
                } else {
                    out.error(&msg);
                }
            }
        }

        match self.mode {
            Mode::DryRun => out.divider("Summary"),
            _ => out.newline(),
        }
        out.preformatted(&self.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Output for Recorder {
        fn key_value(&mut self, key: &str, value: &str) {
            self.0.push(format!("{}: {}", key, value));
        }
        fn added_item(&mut self, text: &str) {
            self.0.push(format!("+ {}", text));
        }
        fn unchanged_item(&mut self, text: &str) {
            self.0.push(format!("= {}", text));
        }
        fn warning(&mut self, msg: &str) {
            self.0.push(format!("warning: {}", msg));
        }
        fn error(&mut self, msg: &str) {
            self.0.push(format!("error: {}", msg));
        }
        fn divider(&mut self, label: &str) {
            self.0.push(format!("-- {} --", label));
        }
        fn preformatted(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
        fn newline(&mut self) {
            self.0.push(String::new());
        }
    }

    fn artifact(generator: &'static str, path: &str, outcome: Outcome) -> ArtifactReport {
        ArtifactReport {
            generator,
            path: Some(PathBuf::from(path)),
            outcome,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_written_report_lists_files_and_warnings() {
        let mut service = artifact("service-client", "ui/app-service.ts", Outcome::Written);
        service
            .diagnostics
            .push(Diagnostic::warning("service-client", "skipped entry 'build_info'"));
        let report = GenerateReport {
            mode: Mode::Write,
            artifacts: vec![
                artifact("tables", "server/database.ts", Outcome::Unchanged),
                service,
            ],
        };

        let mut out = Recorder::default();
        report.render(&mut out);
        assert_eq!(
            out.0,
            vec![
                "= server/database.ts",
                "+ ui/app-service.ts",
                "warning: ui/app-service.ts: skipped entry 'build_info'",
                "",
                "2 of 2 artifacts generated, 1 warnings",
            ]
        );
        assert!(report.ensure_success().is_ok());
    }

    #[test]
    fn test_failure_is_reported() {
        let report = GenerateReport {
            mode: Mode::Check,
            artifacts: vec![
                ArtifactReport {
                    generator: "endpoints",
                    path: None,
                    outcome: Outcome::Failed("unknown api struct".into()),
                    diagnostics: Vec::new(),
                },
                artifact("columns", "db/schema.rs", Outcome::Checked),
            ],
        };

        let mut out = Recorder::default();
        report.render(&mut out);
        assert_eq!(out.0[0], "error: endpoints failed");
        assert_eq!(out.0[2], "columns: db/schema.rs");
        assert_eq!(out.0.last().unwrap(), "1 of 2 artifacts checked, 0 warnings");

        let err = report.ensure_success().unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 artifacts failed");
    }

    #[test]
    fn test_preview_shows_content() {
        let report = GenerateReport {
            mode: Mode::DryRun,
            artifacts: vec![artifact(
                "tables",
                "database.ts",
                Outcome::Preview("export interface X {}\n".into()),
            )],
        };

        let mut out = Recorder::default();
        report.render(&mut out);
        assert_eq!(out.0[0], "-- database.ts --");
        assert_eq!(out.0[1], "export interface X {}\n");
        assert_eq!(out.0[2], "-- Summary --");
    }
}
