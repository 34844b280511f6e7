//! Rendering of parsed MiniLaTeX to HTML.

mod environments;
mod html;
mod macros;
pub mod math;
pub mod text;

pub use environments::{environment_renderer, EnvCall, EnvRender};
pub use html::Renderer;
pub use macros::{macro_renderer, MacroCall, MacroRender};
