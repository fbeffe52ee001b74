use std::path::Path;

use console::Term;
use pdl_core::json;
use pdl_core::types::ProtocolStats;
use pdl_core::JsonStyle;

use crate::cli::GlobalOpts;
use crate::diagnostic::render_diagnostics;
use crate::error::CliError;

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

/// Output context derived from global flags.
///
/// Status messages, warnings and errors go to stderr; stdout is reserved for
/// the converted document and command reports.
pub struct OutputContext {
    pub mode: OutputMode,
    pub quiet: bool,
    pub use_color: bool,
}

impl OutputContext {
    /// Construct from global CLI options.
    pub fn from_global(global: &GlobalOpts) -> Self {
        let mode = match global.format.as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        };

        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();

        Self {
            mode,
            quiet: global.quiet,
            use_color,
        }
    }

    /// Announce an artifact written to a file, e.g.
    /// `wrote JSON protocol.pdl -> protocol.json` (human mode, not quiet).
    pub fn wrote(&self, artifact: &str, input: &str, target: &Path) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        let line = format!("{artifact} {input} -> {}", target.display());
        if self.use_color {
            let style = console::Style::new().green().bold();
            eprintln!("{} {line}", style.apply_to("wrote"));
        } else {
            eprintln!("wrote {line}");
        }
    }

    /// Print a warning to stderr (not in quiet mode).
    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_color {
                    let style = console::Style::new().yellow().bold();
                    eprintln!("{} {}", style.apply_to("warning:"), msg);
                } else {
                    eprintln!("warning: {msg}");
                }
            }
            OutputMode::Json => {
                let json = serde_json::json!({ "warning": msg });
                eprintln!("{json}");
            }
            OutputMode::Plain => {
                eprintln!("warning\t{msg}");
            }
        }
    }

    /// Print an error using the appropriate output mode.
    ///
    /// Parse errors are rendered with source snippets in human mode and one
    /// line per error in plain mode.
    pub fn print_error(&self, err: &CliError) {
        match self.mode {
            OutputMode::Human => {
                if let CliError::Parse {
                    errors,
                    source_text,
                    file,
                } = err
                {
                    for report in render_diagnostics(errors, source_text, file) {
                        eprintln!("{report:?}");
                    }
                }
                if self.use_color {
                    let style = console::Style::new().red().bold();
                    eprintln!("{} {}", style.apply_to("error:"), err);
                } else {
                    eprintln!("error: {err}");
                }
            }
            OutputMode::Json => {
                let json = err.to_json();
                eprintln!("{json}");
            }
            OutputMode::Plain => {
                if let CliError::Parse { errors, file, .. } = err {
                    for e in errors {
                        eprintln!("{file}\t{}\terror\t{e}", e.line());
                    }
                }
                eprintln!("error\t{err}");
            }
        }
    }

    /// Report the declarations found in one checked file (human mode, not
    /// quiet).
    pub fn checked_file(&self, file: &str, stats: &ProtocolStats) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        eprintln!("  {file} .... {}", describe_stats(stats));
    }

    /// Report the totals of a `check` run. Failures turn the line into a
    /// warning, which quiet mode suppresses like any other.
    pub fn check_summary(&self, totals: &ProtocolStats, files: usize, failed: usize) {
        if self.mode != OutputMode::Human {
            return;
        }
        let summary = format!("{} in {files} files", describe_stats(totals));
        if failed > 0 {
            self.warn(&format!("{summary}, {failed} failed"));
        } else if !self.quiet {
            if self.use_color {
                let style = console::Style::new().green().bold();
                eprintln!("{} {summary}", style.apply_to("checked"));
            } else {
                eprintln!("checked {summary}");
            }
        }
    }

    /// Print a machine-readable report on stdout, laid out like converted
    /// documents but with raw UTF-8 so file names stay readable.
    pub fn print_report(&self, report: &serde_json::Value) -> Result<(), CliError> {
        let text = json::to_string(report, JsonStyle::unicode())
            .map_err(|e| CliError::Other(format!("failed to encode report: {e}")))?;
        println!("{text}");
        Ok(())
    }
}

/// `2 domains, 5 types, 9 commands, 3 events`
pub fn describe_stats(stats: &ProtocolStats) -> String {
    format!(
        "{} domains, {} types, {} commands, {} events",
        stats.domains, stats.types, stats.commands, stats.events
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_global(format: &str, quiet: bool, no_color: bool) -> GlobalOpts {
        GlobalOpts {
            config: None,
            format: format.into(),
            verbose: 0,
            quiet,
            no_color,
        }
    }

    #[test]
    fn from_global_human_mode() {
        let ctx = OutputContext::from_global(&make_global("human", false, false));
        assert_eq!(ctx.mode, OutputMode::Human);
        assert!(!ctx.quiet);
    }

    #[test]
    fn from_global_json_mode() {
        let ctx = OutputContext::from_global(&make_global("json", false, false));
        assert_eq!(ctx.mode, OutputMode::Json);
    }

    #[test]
    fn from_global_plain_mode() {
        let ctx = OutputContext::from_global(&make_global("plain", false, false));
        assert_eq!(ctx.mode, OutputMode::Plain);
    }

    #[test]
    fn from_global_no_color_disables_color() {
        let ctx = OutputContext::from_global(&make_global("human", false, true));
        assert!(!ctx.use_color);
    }

    #[test]
    fn describe_stats_counts_every_kind() {
        let stats = ProtocolStats {
            domains: 2,
            types: 5,
            commands: 9,
            events: 1,
        };
        assert_eq!(
            describe_stats(&stats),
            "2 domains, 5 types, 9 commands, 1 events"
        );
        assert_eq!(
            describe_stats(&ProtocolStats::default()),
            "0 domains, 0 types, 0 commands, 0 events"
        );
    }

    #[test]
    fn from_global_quiet_flag() {
        let ctx = OutputContext::from_global(&make_global("human", true, false));
        assert!(ctx.quiet);
    }
}
