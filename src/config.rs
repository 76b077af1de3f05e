//! Configuration loader
//!
//! `defaults/xloc.default.toml` is embedded into the crate so docs and runtime behavior
//! stay in sync. Callers layer user files and CLI overrides on top of those defaults via
//! [`Loader`] before deserializing into [`XlocConfig`].

use crate::formats::{DeclarationsFormatter, FormatError, FormatRegistry, DEFAULT_FORMAT};
use crate::transforms::stages::Rendering;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/xloc.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct XlocConfig {
    pub render: RenderConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub format: String,
    pub indent: usize,
}

impl RenderConfig {
    /// Rendering stage for the configured format
    ///
    /// The indent only applies to the declarations format.
    pub fn rendering(&self, registry: &FormatRegistry) -> Result<Rendering, FormatError> {
        if self.format == DEFAULT_FORMAT {
            Ok(Rendering::with_formatter(DeclarationsFormatter::new(self.indent)))
        } else {
            Rendering::named(registry, &self.format)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub mode: ParserMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParserMode {
    Full,
    Segments,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<XlocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<XlocConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.render.format, "declarations");
        assert_eq!(config.render.indent, 4);
        assert_eq!(config.parser.mode, ParserMode::Full);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.mode", "segments")
            .expect("override to apply")
            .set_override("render.format", "yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.mode, ParserMode::Segments);
        assert_eq!(config.render.format, "yaml");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[render]\nindent = 2").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.render.indent, 2);
        assert_eq!(config.render.format, "declarations");
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/xloc.toml")
            .build()
            .unwrap();
        assert_eq!(config.parser.mode, ParserMode::Full);
    }

    #[test]
    fn required_file_must_exist() {
        assert!(Loader::new().with_file("/nonexistent/xloc.toml").build().is_err());
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = Loader::new()
            .set_override("parser.mode", "fuzzy")
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rendering_for_configured_format() {
        let registry = FormatRegistry::with_defaults();
        let config = load_defaults().unwrap();
        assert_eq!(
            config.render.rendering(&registry).unwrap().format_name(),
            "declarations"
        );

        let unknown = RenderConfig {
            format: "xml".to_string(),
            indent: 4,
        };
        assert!(unknown.rendering(&registry).is_err());
    }
}
