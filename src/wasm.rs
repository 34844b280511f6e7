//! WebAssembly bindings for JavaScript/TypeScript.

#![cfg(feature = "wasm")]

use crate::config::Config;
use crate::editor::{EditRecord, Editor};
use crate::state::LatexState;
use wasm_bindgen::prelude::*;

/// A document being edited in the browser.
///
/// Holds the last [`EditRecord`] so each `update` only re-renders the
/// paragraphs that changed.
#[wasm_bindgen]
pub struct LiveDocument {
    editor: Editor,
    record: EditRecord,
}

#[wasm_bindgen]
impl LiveDocument {
    /// Create a document. `config` is optional TOML.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<LiveDocument, JsError> {
        console_error_panic_hook::set_once();
        let config = match config {
            Some(toml) => {
                Config::from_toml_str(&toml).map_err(|e| JsError::new(&e.to_string()))?
            }
            None => Config::default(),
        };
        Ok(Self {
            editor: Editor::new(&config),
            record: EditRecord::default(),
        })
    }

    /// Apply new source text. `seed` labels the ids of changed paragraphs.
    pub fn update(&mut self, text: &str, seed: u64) {
        self.record = self
            .editor
            .update(&LatexState::new(), &self.record, text, seed);
    }

    /// Re-render every paragraph against the current state.
    pub fn refresh(&mut self) {
        self.record = self.editor.refresh(&LatexState::new(), &self.record);
    }

    #[wasm_bindgen(js_name = renderedParagraphs)]
    pub fn rendered_paragraphs(&self) -> js_sys::Array {
        to_array(&self.record.rendered_paragraphs)
    }

    #[wasm_bindgen(js_name = idList)]
    pub fn id_list(&self) -> js_sys::Array {
        to_array(&self.record.id_list)
    }

    /// `{start, end}` of the ids minted by the last update, or `null`.
    #[wasm_bindgen(js_name = newIdsRange)]
    pub fn new_ids_range(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.record.new_ids_range)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// The accumulated document state as JSON.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.record.latex_state).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Hidden block with the document's `mathmacro` definitions, if any.
    pub fn prologue(&self) -> Option<String> {
        self.editor.renderer().prologue(&self.record.latex_state)
    }

    /// The document as a standalone HTML page.
    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self) -> String {
        self.editor.export(&self.record)
    }
}

fn to_array(items: &[String]) -> js_sys::Array {
    items.iter().map(|s| JsValue::from_str(s)).collect()
}

/// Render a whole MiniLaTeX document to one HTML string.
///
/// Paragraphs are wrapped in `<div>` elements carrying their ids.
#[wasm_bindgen(js_name = renderMiniLatex)]
pub fn render_minilatex(input: &str) -> String {
    crate::render_document_html(input)
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// TypeScript type definitions for documentation
/// ```typescript
/// // minilatex.d.ts
///
/// export function renderMiniLatex(input: string): string;
/// export function getVersion(): string;
///
/// export class LiveDocument {
///     constructor(config?: string);
///     update(text: string, seed: bigint): void;
///     refresh(): void;
///     renderedParagraphs(): string[];
///     idList(): string[];
///     newIdsRange(): { start: number; end: number } | null;
///     stateJson(): string;
///     prologue(): string | undefined;
///     exportHtml(): string;
/// }
/// ```
const _: () = ();
