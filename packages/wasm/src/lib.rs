use folio_editor::{
    EditSession, EditorConfig, EditorError, Intent, Position, Section, Selection, Snapshot,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// One open document, owned by the UI layer
#[wasm_bindgen]
pub struct EditorHandle {
    session: EditSession,
}

#[wasm_bindgen]
impl EditorHandle {
    /// Open a snapshot (JSON), or a blank document when none is given
    #[wasm_bindgen(constructor)]
    pub fn new(snapshot_json: Option<String>, config_json: Option<String>) -> Result<EditorHandle, JsValue> {
        let config: EditorConfig = match config_json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?,
            None => EditorConfig::default(),
        };

        let session = match snapshot_json {
            Some(json) => {
                let snapshot = Snapshot::from_json(&json).map_err(to_js)?;
                EditSession::from_snapshot("wasm", &snapshot, config).map_err(to_js)?
            }
            None => {
                let doc = folio_editor::Document::new(vec![Section::new("main")]).map_err(to_js)?;
                EditSession::new("wasm", doc, config).map_err(to_js)?
            }
        };

        Ok(EditorHandle { session })
    }

    /// Apply an intent such as `{"type":"enter"}`; returns
    /// `{"opsApplied":n,"cursorAfter":{...}}`
    #[wasm_bindgen(js_name = applyIntent)]
    pub fn apply_intent(&mut self, intent_json: &str) -> Result<String, JsValue> {
        let intent: Intent = serde_json::from_str(intent_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid intent: {}", e)))?;
        let outcome = self.session.apply_intent(&intent).map_err(to_js)?;
        to_json(&outcome)
    }

    /// Returns false when there was nothing to undo
    pub fn undo(&mut self) -> Result<bool, JsValue> {
        match self.session.undo() {
            Ok(_) => Ok(true),
            Err(EditorError::EmptyHistory) => Ok(false),
            Err(err) => Err(to_js(err)),
        }
    }

    /// Returns false when there was nothing to redo
    pub fn redo(&mut self) -> Result<bool, JsValue> {
        match self.session.redo() {
            Ok(_) => Ok(true),
            Err(EditorError::EmptyHistory) => Ok(false),
            Err(err) => Err(to_js(err)),
        }
    }

    /// Set the selection; the anchor and focus may be in either order
    pub fn select(
        &mut self,
        start_paragraph: &str,
        start_offset: usize,
        end_paragraph: &str,
        end_offset: usize,
    ) -> Result<(), JsValue> {
        self.session
            .set_selection(Selection::new(
                Position::new(start_paragraph, start_offset),
                Position::new(end_paragraph, end_offset),
            ))
            .map_err(to_js)
    }

    /// Queue text the UI already rendered
    #[wasm_bindgen(js_name = observeText)]
    pub fn observe_text(&mut self, paragraph: &str, text: &str, cursor_offset: usize) -> Result<String, JsValue> {
        self.session
            .observe_text(paragraph, text, cursor_offset)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = commitObservations)]
    pub fn commit_observations(&mut self) -> Result<usize, JsValue> {
        self.session.commit_observations().map_err(to_js)
    }

    /// Current document as `{sections:[{name, paragraphs:[{name, type, text}]}]}`
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.session.snapshot())
    }

    #[wasm_bindgen(js_name = getSelection)]
    pub fn get_selection(&self) -> Result<String, JsValue> {
        to_json(self.session.selection())
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.history().can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.history().can_redo()
    }
}
