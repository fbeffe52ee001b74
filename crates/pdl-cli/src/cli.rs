use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Converts PDL protocol descriptions to JSON.
///
/// With no subcommand, reads a PDL document from standard input and writes
/// the equivalent JSON document to standard output.
#[derive(Parser)]
#[command(
    name = "pdl2json",
    version,
    about = "Convert PDL protocol descriptions to JSON",
    after_help = "With no command, reads PDL from stdin and writes JSON to stdout.\n\
                  Use 'pdl2json <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path. Subcommands also search PDL2JSON_CONFIG and
    /// the usual locations; a bare invocation reads only this flag.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a PDL document to JSON
    Convert(ConvertArgs),

    /// Parse .pdl files and report what they declare
    Check(CheckArgs),

    /// Generate TypeScript declarations from a protocol
    Typescript(TypescriptArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments for `pdl2json convert`.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input file; '-' or nothing reads stdin
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Logical source name handed to the parser; names not ending in .pdl are read as JSON
    #[arg(long = "source-name")]
    pub source_name: Option<String>,

    /// Keep `binary` types instead of recording them as `string`
    #[arg(long = "strict")]
    pub strict: bool,

    /// Write non-ASCII characters as UTF-8 instead of \uXXXX escapes
    #[arg(long = "unicode")]
    pub unicode: bool,
}

/// Arguments for `pdl2json check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// .pdl files or directories to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for `pdl2json typescript`.
#[derive(Args, Debug)]
pub struct TypescriptArgs {
    /// Namespace name, appended to the prefix (e.g. V8 gives CdpV8)
    #[arg(short = 'n', long = "name")]
    pub name: String,

    /// Input file; '-' or nothing reads stdin
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Namespace prefix (default from config, else Cdp)
    #[arg(long = "prefix")]
    pub prefix: Option<String>,

    /// Logical source name handed to the parser; names not ending in .pdl are read as JSON
    #[arg(long = "source-name")]
    pub source_name: Option<String>,
}

/// Arguments for `pdl2json completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["pdl2json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.global.format, "human");
    }

    #[test]
    fn parse_global_verbose() {
        let cli = Cli::try_parse_from(["pdl2json", "-vvv"]).unwrap();
        assert_eq!(cli.global.verbose, 3);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["pdl2json", "-q", "-v"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pdl2json", "check", "a.pdl", "--format", "json"]).unwrap();
        assert_eq!(cli.global.format, "json");
    }

    #[test]
    fn parse_convert_command() {
        let cli = Cli::try_parse_from([
            "pdl2json",
            "convert",
            "browser_protocol.pdl",
            "-o",
            "out.json",
            "--strict",
            "--unicode",
            "--source-name",
            "js_protocol.pdl",
        ])
        .unwrap();
        if let Some(Commands::Convert(args)) = cli.command {
            assert_eq!(args.input, Some(PathBuf::from("browser_protocol.pdl")));
            assert_eq!(args.output, Some(PathBuf::from("out.json")));
            assert!(args.strict);
            assert!(args.unicode);
            assert_eq!(args.source_name.as_deref(), Some("js_protocol.pdl"));
        } else {
            panic!("expected Convert command");
        }
    }

    #[test]
    fn check_requires_paths() {
        assert!(Cli::try_parse_from(["pdl2json", "check"]).is_err());
        let cli = Cli::try_parse_from(["pdl2json", "check", "a.pdl", "protocols/"]).unwrap();
        if let Some(Commands::Check(args)) = cli.command {
            assert_eq!(args.paths.len(), 2);
        } else {
            panic!("expected Check command");
        }
    }

    #[test]
    fn typescript_requires_name() {
        assert!(Cli::try_parse_from(["pdl2json", "typescript"]).is_err());
        let cli = Cli::try_parse_from(["pdl2json", "typescript", "--name", "V8", "x.pdl"]).unwrap();
        if let Some(Commands::Typescript(args)) = cli.command {
            assert_eq!(args.name, "V8");
            assert_eq!(args.input, Some(PathBuf::from("x.pdl")));
            assert!(args.prefix.is_none());
        } else {
            panic!("expected Typescript command");
        }
    }

    #[test]
    fn completions_shells() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["pdl2json", "completions", shell]).unwrap();
            assert!(matches!(cli.command, Some(Commands::Completions(_))));
        }
        assert!(Cli::try_parse_from(["pdl2json", "completions", "tcsh"]).is_err());
    }
}
