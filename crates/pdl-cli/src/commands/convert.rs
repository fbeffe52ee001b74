use pdl_core::Converter;
use pdl_dsl::PdlParser;
use tracing::info;

use super::{read_input, write_output};
use crate::cli::{ConvertArgs, GlobalOpts};
use crate::config::{load_config, load_explicit_config, resolve_convert_settings, CliConfig};
use crate::error::CliError;
use crate::output::OutputContext;

/// Run the `convert` command.
pub fn run(args: ConvertArgs, global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    convert_with(&config, args, output)
}

/// Run a bare `pdl2json`: stdin to stdout with the built-in settings.
///
/// No configuration is discovered here; only a file given with `--config`
/// can change the output.
pub fn run_default(global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let config = load_explicit_config(global.config.as_deref())?;
    convert_with(&config, ConvertArgs::default(), output)
}

/// The whole document is converted before anything is written, so a failed
/// conversion leaves stdout (or the output file) untouched.
fn convert_with(
    config: &CliConfig,
    args: ConvertArgs,
    output: &OutputContext,
) -> Result<(), CliError> {
    let settings = resolve_convert_settings(config, &args);

    let (text, file) = read_input(args.input.as_deref())?;

    let converter = Converter::new(PdlParser)
        .with_source_name(settings.source_name.as_str())
        .with_lenient(settings.lenient)
        .with_style(settings.json_style());

    let json = match converter.convert(&text) {
        Ok(json) => json,
        Err(e) => return Err(CliError::from_convert(e, text, &file)),
    };
    info!(
        input = %file,
        source = %settings.source_name,
        lenient = settings.lenient,
        bytes = json.len(),
        "converted protocol"
    );

    write_output(args.output.as_deref(), &json)?;
    if let Some(path) = &args.output {
        output.wrote("JSON", &file, path);
    }
    Ok(())
}
