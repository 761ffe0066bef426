//! Configuration for proofc
//!
//! Settings come from a TOML file, then environment variables, then the
//! command line (applied by the binary).
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./proofc.toml` - Project-local configuration
//! 2. `~/.config/proofc/config.toml` - User configuration (XDG)
//! 3. `~/.proofc/config.toml` - User configuration (legacy)
//! 4. `/etc/proofc/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `PROOFC_FORMAT` - Output format (text, latex, json)
//! - `PROOFC_LOG_LEVEL` - Logging verbosity (quiet, normal, verbose, debug)
//! - `PROOFC_OPTIMIZE` - Run the optimizer before rendering (true/false)
//! - `PROOFC_OUTPUT_DIR` - Directory for generated files
//! - `PROOFC_LATEX_DOCUMENT` - Wrap LaTeX in a standalone article (true/false)
//!
//! # Example Configuration
//!
//! ```toml
//! # proofc.toml
//!
//! [general]
//! format = "latex"
//! log_level = "normal"
//!
//! [checker]
//! optimize = true
//! equivalence_rules_only = false
//!
//! [output]
//! directory = "out"
//! latex_document = true
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProofcConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Checking and compaction
    pub checker: CheckerConfig,
    /// Generated files
    pub output: OutputConfig,
}

/// General configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format (text, latex, json)
    pub format: OutputFormat,
    /// Logging level
    pub log_level: LogLevel,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Latex,
            log_level: LogLevel::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Drop unused lines and renumber before rendering
    pub optimize: bool,
    /// Treat every input as an equivalence proof
    pub equivalence_rules_only: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            optimize: true,
            equivalence_rules_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory; `None` writes next to the input
    pub directory: Option<String>,
    /// Wrap LaTeX output in a compilable article
    pub latex_document: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            latex_document: true,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Rendering target for a compiled proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Latex,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Latex => "latex",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "proof" => Some(OutputFormat::Text),
            "latex" | "tex" => Some(OutputFormat::Latex),
            "json" | "mathjax" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// File extension of generated files
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Latex => "tex",
            OutputFormat::Json => "json",
        }
    }
}

/// Logging verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" => Some(LogLevel::Quiet),
            "normal" | "n" => Some(LogLevel::Normal),
            "verbose" | "v" => Some(LogLevel::Verbose),
            "debug" | "d" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Directive for a `tracing_subscriber::EnvFilter`
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "info",
            LogLevel::Debug => "debug",
        }
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

impl ProofcConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the first config file found, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.clone(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.clone(), e.to_string()))
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(PathBuf::from("<string>"), e.to_string()))
    }

    /// Candidate config file locations, most specific first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("proofc.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("proofc").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".proofc").join("config.toml"));
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/proofc/config.toml"));

        paths
    }

    /// Apply `PROOFC_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("PROOFC_FORMAT") {
            self.general.format = OutputFormat::from_str(&val)
                .ok_or_else(|| ConfigError::InvalidValue("PROOFC_FORMAT".into(), val))?;
        }
        if let Some(val) = lookup("PROOFC_LOG_LEVEL") {
            self.general.log_level = LogLevel::from_str(&val)
                .ok_or_else(|| ConfigError::InvalidValue("PROOFC_LOG_LEVEL".into(), val))?;
        }
        if let Some(val) = lookup("PROOFC_OPTIMIZE") {
            self.checker.optimize = parse_bool("PROOFC_OPTIMIZE", val)?;
        }
        if let Some(val) = lookup("PROOFC_OUTPUT_DIR") {
            self.output.directory = if val.is_empty() { None } else { Some(val) };
        }
        if let Some(val) = lookup("PROOFC_LATEX_DOCUMENT") {
            self.output.latex_document = parse_bool("PROOFC_LATEX_DOCUMENT", val)?;
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Commented template written by `--init-config`
    pub fn default_config_content() -> &'static str {
        r#"# proofc configuration file
# Place this file at ./proofc.toml or ~/.config/proofc/config.toml

[general]
# Output format: text, latex, json
format = "latex"
# Logging level: quiet, normal, verbose, debug
log_level = "normal"

[checker]
# Drop lines the conclusion does not depend on and renumber the rest
optimize = true
# Check every input as an equivalence proof
equivalence_rules_only = false

[output]
# Directory for generated files (default: next to the input file)
# directory = "out"
# Wrap LaTeX output in a standalone article
latex_document = true
"#
    }
}

fn parse_bool(key: &str, val: String) -> Result<bool, ConfigError> {
    match val.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string(), val)),
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading/writing config file
    IoError(PathBuf, String),
    /// Parse error in config file
    ParseError(PathBuf, String),
    /// Serialization error
    SerializeError(String),
    /// A setting with an unrecognized value
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, msg) => {
                write!(f, "IO error reading {}: {}", path.display(), msg)
            }
            ConfigError::ParseError(path, msg) => {
                write!(f, "Parse error in {}: {}", path.display(), msg)
            }
            ConfigError::SerializeError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ProofcConfig::new();
        assert_eq!(config.general.format, OutputFormat::Latex);
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert!(config.checker.optimize);
        assert!(!config.checker.equivalence_rules_only);
        assert_eq!(config.output.directory, None);
        assert!(config.output.latex_document);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [general]
            format = "json"
            log_level = "verbose"

            [checker]
            optimize = false

            [output]
            directory = "out"
        "#;

        let config = ProofcConfig::load_from_str(toml).unwrap();
        assert_eq!(config.general.format, OutputFormat::Json);
        assert_eq!(config.general.log_level, LogLevel::Verbose);
        assert!(!config.checker.optimize);
        assert_eq!(config.output.directory.as_deref(), Some("out"));
        assert!(config.output.latex_document);
    }

    #[test]
    fn test_parse_error() {
        let err = ProofcConfig::load_from_str("[general]\nformat = \"pdf\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(..)));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("latex"), Some(OutputFormat::Latex));
        assert_eq!(OutputFormat::from_str("TEX"), Some(OutputFormat::Latex));
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("pdf"), None);
        assert_eq!(OutputFormat::Latex.extension(), "tex");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("quiet"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::from_str("verbose"), Some(LogLevel::Verbose));
        assert_eq!(LogLevel::from_str("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::Normal.filter_directive(), "warn");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PROOFC_FORMAT", "json"),
            ("PROOFC_OPTIMIZE", "no"),
            ("PROOFC_OUTPUT_DIR", "build"),
        ]
        .into_iter()
        .collect();

        let mut config = ProofcConfig::new();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.general.format, OutputFormat::Json);
        assert!(!config.checker.optimize);
        assert_eq!(config.output.directory.as_deref(), Some("build"));
    }

    #[test]
    fn test_invalid_override() {
        let mut config = ProofcConfig::new();
        let err = config
            .apply_overrides(|key| (key == "PROOFC_LATEX_DOCUMENT").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _) if key == "PROOFC_LATEX_DOCUMENT"));
    }

    #[test]
    fn test_serialize_config() {
        let config = ProofcConfig::new();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("format = \"latex\""));
        assert_eq!(ProofcConfig::load_from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_default_content_parses() {
        let config = ProofcConfig::load_from_str(ProofcConfig::default_config_content()).unwrap();
        assert_eq!(config, ProofcConfig::default());
    }

    #[test]
    fn test_config_paths() {
        let paths = ProofcConfig::config_paths();
        assert_eq!(paths[0], PathBuf::from("proofc.toml"));
    }
}
