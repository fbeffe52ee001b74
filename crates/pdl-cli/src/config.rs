use std::path::{Path, PathBuf};

use pdl_core::typescript::DEFAULT_NAMESPACE_PREFIX;
use pdl_core::{JsonStyle, DEFAULT_SOURCE_NAME};
use serde::{Deserialize, Serialize};

use crate::cli::ConvertArgs;
use crate::error::CliError;

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "pdl2json.toml";

/// CLI configuration loaded from `pdl2json.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub convert: ConvertSettings,
    #[serde(default)]
    pub typescript: TypescriptSettings,
}

/// Defaults for the conversion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertSettings {
    #[serde(default = "default_source_name")]
    pub source_name: String,
    #[serde(default = "default_true")]
    pub lenient: bool,
    #[serde(default = "default_true")]
    pub ascii_only: bool,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            source_name: default_source_name(),
            lenient: true,
            ascii_only: true,
        }
    }
}

impl ConvertSettings {
    pub fn json_style(&self) -> JsonStyle {
        JsonStyle {
            ascii_only: self.ascii_only,
        }
    }
}

/// TypeScript generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypescriptSettings {
    #[serde(default = "default_namespace_prefix")]
    pub namespace_prefix: String,
}

impl Default for TypescriptSettings {
    fn default() -> Self {
        Self {
            namespace_prefix: default_namespace_prefix(),
        }
    }
}

fn default_source_name() -> String {
    DEFAULT_SOURCE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_namespace_prefix() -> String {
    DEFAULT_NAMESPACE_PREFIX.to_string()
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit)
/// 2. `PDL2JSON_CONFIG` env var
/// 3. `./pdl2json.toml` (project-local)
/// 4. `$XDG_CONFIG_HOME/pdl2json/config.toml`
/// 5. `~/.config/pdl2json/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    if let Ok(env_path) = std::env::var("PDL2JSON_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("pdl2json/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/pdl2json/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Ok(CliConfig::default())
}

/// Configuration for a bare `pdl2json`: the built-in defaults, or the file
/// named by `--config`. No other location or environment variable is read.
pub fn load_explicit_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    match explicit_path {
        Some(path) => load_config_from_path(path),
        None => Ok(CliConfig::default()),
    }
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: CliConfig = toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Resolve conversion settings from config + CLI overrides.
///
/// CLI flags take precedence over config file values.
pub fn resolve_convert_settings(config: &CliConfig, args: &ConvertArgs) -> ConvertSettings {
    ConvertSettings {
        source_name: args
            .source_name
            .clone()
            .unwrap_or_else(|| config.convert.source_name.clone()),
        lenient: config.convert.lenient && !args.strict,
        ascii_only: config.convert.ascii_only && !args.unicode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = CliConfig::default();
        assert_eq!(config.convert.source_name, "protocol.pdl");
        assert!(config.convert.lenient);
        assert!(config.convert.ascii_only);
        assert_eq!(config.typescript.namespace_prefix, "Cdp");
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
[convert]
lenient = false
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.convert.lenient);
        assert_eq!(config.convert.source_name, "protocol.pdl");
        assert!(config.convert.ascii_only);
        assert_eq!(config.typescript.namespace_prefix, "Cdp");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[convert]
source_name = "js_protocol.pdl"
lenient = false
ascii_only = false

[typescript]
namespace_prefix = "Proto"
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.convert.source_name, "js_protocol.pdl");
        assert!(!config.convert.lenient);
        assert!(!config.convert.ascii_only);
        assert_eq!(config.typescript.namespace_prefix, "Proto");
    }

    #[test]
    fn resolve_uses_config_defaults() {
        let settings = resolve_convert_settings(&CliConfig::default(), &ConvertArgs::default());
        assert_eq!(settings, ConvertSettings::default());
        assert_eq!(settings.json_style(), JsonStyle::default());
    }

    #[test]
    fn resolve_cli_overrides() {
        let args = ConvertArgs {
            source_name: Some("protocol.json".into()),
            strict: true,
            unicode: true,
            ..ConvertArgs::default()
        };
        let settings = resolve_convert_settings(&CliConfig::default(), &args);
        assert_eq!(settings.source_name, "protocol.json");
        assert!(!settings.lenient);
        assert!(!settings.ascii_only);
        assert_eq!(settings.json_style(), JsonStyle::unicode());
    }

    #[test]
    fn load_config_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[typescript]\nnamespace_prefix = \"X\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.typescript.namespace_prefix, "X");
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[convert\nlenient = ").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn explicit_only_config_ignores_local_file() {
        // No path given: defaults, whatever lies in the working directory.
        let config = load_explicit_config(None).unwrap();
        assert_eq!(config.convert, ConvertSettings::default());
    }

    #[test]
    fn explicit_only_config_reads_given_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[convert]\nsource_name = \"protocol.json\"\n").unwrap();
        let config = load_explicit_config(Some(&path)).unwrap();
        assert_eq!(config.convert.source_name, "protocol.json");
        assert!(load_explicit_config(Some(Path::new("/nonexistent/pdl2json.toml"))).is_err());
    }

    #[test]
    fn load_config_from_explicit_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/pdl2json.toml")));
        assert!(result.is_err());
    }
}
