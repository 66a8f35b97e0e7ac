//! Home-run animation slots for the softball scoreboard.
//!
//! Ten fixed slots, each a message, background colour, optional image,
//! display mode and text animation, kept in browser storage. The library
//! holds every piece that does not need a DOM: the slot model, storage,
//! media helpers, the edit session, view models, grid layout and gesture
//! state machines. The yew front end lives in `main.rs`.

use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod cache;
pub mod config;
pub mod gesture;
pub mod layout;
pub mod logging;
pub mod media;
pub mod session;
pub mod settings;
pub mod slot;
pub mod store;
pub mod utils;
pub mod view;
pub mod worker_agent;

pub use board::{ScoreboardAnimationStore, SessionError};
pub use media::{contrasting_text_color, ContrastRule, MediaError};
pub use session::{EditSession, ImageUpdate, SlotField};
pub use slot::{normalize, DisplayMode, Slot, SlotArray, TextAnimation};
pub use settings::{load_settings, save_settings, settings_from_value, ScoreboardSettings};
pub use store::{load_slots, save_slots, KeyValueStore, LocalStore, MemoryStore, StoreError};

/// Normalize one slot for the scoreboard script.
///
/// Accepts any JS value and always returns a valid slot object.
#[wasm_bindgen(js_name = normalizeSlot)]
pub fn normalize_slot_js(raw: JsValue) -> JsValue {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(raw).unwrap_or_else(|e| {
        warn!("normalizeSlot received an unreadable value: {}", e);
        serde_json::Value::Null
    });
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    normalize(&value)
        .serialize(&serializer)
        .unwrap_or(JsValue::NULL)
}

/// Text colour for a team or slot background, using the shared contrast rule.
#[wasm_bindgen(js_name = contrastingTextColor)]
pub fn contrasting_text_color_js(color: &str) -> String {
    contrasting_text_color(color, view::VIEW_CONTRAST).to_string()
}

/// Scoreboard settings as stored, merged over the defaults.
#[wasm_bindgen(js_name = loadScoreboardSettings)]
pub fn load_scoreboard_settings_js() -> JsValue {
    let settings = match LocalStore::open() {
        Ok(store) => load_settings(&store),
        Err(e) => {
            warn!("{}; using default scoreboard settings", e);
            ScoreboardSettings::default()
        }
    };
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    settings.serialize(&serializer).unwrap_or(JsValue::NULL)
}

/// Merge `raw` over the defaults, persist it and return what was stored.
#[wasm_bindgen(js_name = saveScoreboardSettings)]
pub fn save_scoreboard_settings_js(raw: JsValue) -> Result<JsValue, JsValue> {
    let value: serde_json::Value =
        serde_wasm_bindgen::from_value(raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let settings = settings_from_value(&value);
    let store = LocalStore::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
    save_settings(&store, &settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    settings
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
