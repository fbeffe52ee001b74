use pdl_core::{typescript, Converter};
use pdl_dsl::PdlParser;
use tracing::info;

use super::{read_input, write_output};
use crate::cli::{GlobalOpts, TypescriptArgs};
use crate::config::load_config;
use crate::error::CliError;
use crate::output::OutputContext;

/// Run the `typescript` command: emit declarations for a protocol.
pub fn run(
    args: TypescriptArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let source_name = args
        .source_name
        .unwrap_or_else(|| config.convert.source_name.clone());
    let prefix = args
        .prefix
        .unwrap_or_else(|| config.typescript.namespace_prefix.clone());

    let (text, file) = read_input(args.input.as_deref())?;

    let converter = Converter::new(PdlParser)
        .with_source_name(source_name)
        .with_lenient(config.convert.lenient);
    let document = match converter.parse(&text) {
        Ok(document) => document,
        Err(e) => return Err(CliError::from_convert(e, text, &file)),
    };
    let protocol = document
        .to_protocol()
        .map_err(|e| CliError::InvalidProtocol {
            file: file.clone(),
            message: e.to_string(),
        })?;

    let declarations = typescript::generate_with_prefix(&prefix, &args.name, &protocol);
    info!(
        input = %file,
        namespace = %format!("{prefix}{}", args.name),
        domains = protocol.domains.len(),
        "generated TypeScript declarations"
    );

    write_output(args.output.as_deref(), &declarations)?;
    if let Some(path) = &args.output {
        output.wrote("TypeScript", &file, path);
    }
    Ok(())
}
