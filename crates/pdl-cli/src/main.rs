mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::error::ExitCode;

fn main() {
    let cli = cli::Cli::parse();
    let output = output::OutputContext::from_global(&cli.global);
    logging::init(&cli.global, output.use_color);

    let result = match cli.command {
        None => commands::convert::run_default(&cli.global, &output),
        Some(cli::Commands::Convert(args)) => commands::convert::run(args, &cli.global, &output),
        Some(cli::Commands::Check(args)) => commands::check::run(args, &cli.global, &output),
        Some(cli::Commands::Typescript(args)) => {
            commands::typescript::run(args, &cli.global, &output)
        }
        Some(cli::Commands::Completions(args)) => commands::completions::run(args),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success as i32),
        Err(e) => {
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    }
}
