//! Math rendering backends.
//!
//! Math source is opaque to this crate; backends only wrap it in the markup a
//! client-side typesetter expects.

mod katex;

pub use self::katex::KaTeXRenderer;

use crate::error::ConfigError;
use std::str::FromStr;

/// Math rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathBackend {
    /// Output raw LaTeX for KaTeX auto-render.
    #[default]
    KaTeX,
    /// Output raw LaTeX for MathJax.
    MathJax,
}

impl FromStr for MathBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "katex" => Ok(Self::KaTeX),
            "mathjax" => Ok(Self::MathJax),
            other => Err(ConfigError::UnknownMathBackend(other.to_string())),
        }
    }
}

/// Trait for math renderers.
pub trait MathRenderer {
    /// Render inline math.
    fn render_inline(&self, latex: &str) -> String;

    /// Render display math.
    fn render_display(&self, latex: &str) -> String;

    /// Get any required HTML head content (scripts, styles).
    fn head_content(&self) -> Option<String>;
}

/// Create a math renderer for the given backend.
pub fn create_renderer(backend: MathBackend) -> Box<dyn MathRenderer> {
    match backend {
        MathBackend::KaTeX => Box::new(KaTeXRenderer::new()),
        MathBackend::MathJax => Box::new(KaTeXRenderer::new_mathjax()),
    }
}
