//! Configuration loaded from TOML.
//!
//! ```toml
//! [render]
//! math_backend = "katex"
//! error_class = "error"
//!
//! [editor]
//! id_prefix = "p"
//! state_carry = "reseed"
//! ```

use crate::error::{ConfigError, Result};
use crate::render::math::MathBackend;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub render: RenderConfig,
    pub editor: EditorConfig,
}

/// Options for HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Math rendering backend.
    pub math_backend: MathBackend,
    /// CSS class of the span a parse error renders as.
    pub error_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            math_backend: MathBackend::KaTeX,
            error_class: "error".to_string(),
        }
    }
}

/// Options for incremental editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// First component of minted paragraph ids.
    pub id_prefix: String,
    pub state_carry: StateCarry,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            id_prefix: "p".to_string(),
            state_carry: StateCarry::Reseed,
        }
    }
}

/// How an incremental update obtains the state for the changed paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateCarry {
    /// Re-accumulate the whole document from cached parses, so the changed
    /// paragraphs see the counters of their own position.
    #[default]
    Reseed,
    /// Accumulate only the changed paragraphs, starting from the initial
    /// state. Numbers after an edit can differ from a full render.
    Fresh,
}

impl FromStr for StateCarry {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reseed" => Ok(Self::Reseed),
            "fresh" => Ok(Self::Fresh),
            other => Err(ConfigError::UnknownStateCarry(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    render: RawRenderConfig,
    editor: RawEditorConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawRenderConfig {
    math_backend: Option<String>,
    error_class: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawEditorConfig {
    id_prefix: Option<String>,
    state_carry: Option<String>,
}

impl Config {
    /// Parse configuration from a TOML string. Missing fields take their
    /// defaults.
    pub fn from_toml_str(input: &str) -> std::result::Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(input)?;
        convert_config(raw)
    }

    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&input)?)
    }
}

fn convert_config(raw: RawConfig) -> std::result::Result<Config, ConfigError> {
    let render_defaults = RenderConfig::default();
    let editor_defaults = EditorConfig::default();

    let math_backend = match raw.render.math_backend {
        Some(name) => name.parse()?,
        None => render_defaults.math_backend,
    };
    let state_carry = match raw.editor.state_carry {
        Some(name) => name.parse()?,
        None => editor_defaults.state_carry,
    };

    Ok(Config {
        render: RenderConfig {
            math_backend,
            error_class: raw.render.error_class.unwrap_or(render_defaults.error_class),
        },
        editor: EditorConfig {
            id_prefix: raw.editor.id_prefix.unwrap_or(editor_defaults.id_prefix),
            state_carry,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
[render]
math_backend = "mathjax"
error_class = "mlx-error"

[editor]
id_prefix = "para"
state_carry = "fresh"
"#,
        )
        .unwrap();
        assert_eq!(config.render.math_backend, MathBackend::MathJax);
        assert_eq!(config.render.error_class, "mlx-error");
        assert_eq!(config.editor.id_prefix, "para");
        assert_eq!(config.editor.state_carry, StateCarry::Fresh);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml_str("[editor]\nid_prefix = \"x\"").unwrap();
        assert_eq!(config.editor.id_prefix, "x");
        assert_eq!(config.editor.state_carry, StateCarry::Reseed);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_unknown_names_are_errors() {
        assert!(matches!(
            Config::from_toml_str("[render]\nmath_backend = \"mathml\""),
            Err(ConfigError::UnknownMathBackend(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[editor]\nstate_carry = \"lazy\""),
            Err(ConfigError::UnknownStateCarry(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[render]\ntheme = \"dark\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::from_path("/nonexistent/minilatex.toml"),
            Err(crate::error::Error::Io(_))
        ));
    }
}
