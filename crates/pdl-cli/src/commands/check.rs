use std::path::{Path, PathBuf};

use pdl_core::types::ProtocolStats;
use pdl_dsl::DslError;

use crate::cli::{CheckArgs, GlobalOpts};
use crate::config::load_config;
use crate::diagnostic::render_diagnostics;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Outcome of checking one file.
enum FileReport {
    Parsed(ProtocolStats),
    Failed(Vec<DslError>),
    NotProtocol(String),
}

/// Run the `check` command: parse protocol files and report their contents.
pub fn run(args: CheckArgs, global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let files = discover_protocol_files(&args.paths)?;

    let mut totals = ProtocolStats::default();
    let mut failed = 0usize;
    let mut all_file_results: Vec<serde_json::Value> = Vec::new();

    for file in &files {
        let source_text = std::fs::read_to_string(file).map_err(|e| CliError::Io {
            path: file.clone(),
            source: e,
        })?;
        let filename = file.display().to_string();
        let source_name = source_name_for(file, &config.convert.source_name);

        let report = match pdl_dsl::loads(&source_text, &source_name, config.convert.lenient) {
            Ok(document) => match document.to_protocol() {
                Ok(protocol) => FileReport::Parsed(protocol.stats()),
                Err(e) => FileReport::NotProtocol(e.to_string()),
            },
            Err(errors) => FileReport::Failed(errors.into_vec()),
        };

        match report {
            FileReport::Parsed(stats) => {
                totals.domains += stats.domains;
                totals.types += stats.types;
                totals.commands += stats.commands;
                totals.events += stats.events;

                match output.mode {
                    OutputMode::Human => output.checked_file(&filename, &stats),
                    OutputMode::Json => all_file_results.push(serde_json::json!({
                        "file": filename,
                        "domains": stats.domains,
                        "types": stats.types,
                        "commands": stats.commands,
                        "events": stats.events,
                        "errors": [],
                    })),
                    OutputMode::Plain => println!(
                        "{filename}\t{}\t{}\t{}\t{}",
                        stats.domains, stats.types, stats.commands, stats.events
                    ),
                }
            }
            FileReport::Failed(errors) => {
                failed += 1;
                match output.mode {
                    OutputMode::Human => {
                        for report in render_diagnostics(&errors, &source_text, &filename) {
                            eprintln!("{report:?}");
                        }
                    }
                    OutputMode::Json => {
                        let error_list: Vec<serde_json::Value> = errors
                            .iter()
                            .map(|e| serde_json::json!({ "line": e.line(), "message": e.to_string() }))
                            .collect();
                        all_file_results.push(serde_json::json!({
                            "file": filename,
                            "errors": error_list,
                        }));
                    }
                    OutputMode::Plain => {
                        for err in &errors {
                            eprintln!("{filename}\t{}\terror\t{err}", err.line());
                        }
                    }
                }
            }
            FileReport::NotProtocol(message) => {
                failed += 1;
                match output.mode {
                    OutputMode::Json => all_file_results.push(serde_json::json!({
                        "file": filename,
                        "errors": [{ "message": message }],
                    })),
                    _ => output.warn(&format!("{filename}: not a protocol document: {message}")),
                }
            }
        }
    }

    match output.mode {
        OutputMode::Human => output.check_summary(&totals, files.len(), failed),
        OutputMode::Json => {
            output.print_report(&serde_json::json!({
                "files": files.len(),
                "failed": failed,
                "domains": totals.domains,
                "types": totals.types,
                "commands": totals.commands,
                "events": totals.events,
                "results": all_file_results,
            }))?;
        }
        OutputMode::Plain => {
            println!("{}\t{failed}", files.len());
        }
    }

    if failed > 0 {
        Err(CliError::CheckFailed {
            failed,
            total: files.len(),
        })
    } else {
        Ok(())
    }
}

/// The file's own name decides between PDL and JSON; the configured name is
/// the fallback for paths without one.
fn source_name_for(file: &Path, fallback: &str) -> String {
    file.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| fallback.to_string(), str::to_string)
}

/// Discover .pdl files from a list of paths.
///
/// Paths can be files (used directly) or directories (searched recursively
/// for files matching `**/*.pdl`).
fn discover_protocol_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let pattern = format!("{}/**/*.pdl", path.display());
            let entries = glob::glob(&pattern).map_err(|e| CliError::Other(e.to_string()))?;
            for entry in entries {
                let entry = entry.map_err(|e| CliError::Other(e.to_string()))?;
                files.push(entry);
            }
        } else {
            return Err(CliError::NoProtocolFiles { path: path.clone() });
        }
    }

    if files.is_empty() {
        let display_path = paths.first().cloned().unwrap_or_else(|| PathBuf::from("."));
        return Err(CliError::NoProtocolFiles { path: display_path });
    }

    files.sort();
    files.dedup();
    Ok(files)
}
