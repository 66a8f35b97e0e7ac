//! Scoreboard display settings, stored beside the animation slots.
//!
//! The animation editor never reads these; they belong to the scoreboard
//! page, which shares the same storage.

use crate::config::SETTINGS_KEY;
use crate::store::{KeyValueStore, StoreError};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub inning: String,
    pub out: String,
    pub hr: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            inning: "INNING".to_string(),
            out: "OUT".to_string(),
            hr: "HR".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreboardSettings {
    /// Inning counter rolls over to zero past this value.
    pub max_inning: u32,
    pub faint_opacity: f64,
    pub enable_inning: bool,
    pub enable_out: bool,
    #[serde(rename = "enableHR")]
    pub enable_hr: bool,
    #[serde(rename = "autoHRAnimation")]
    pub auto_hr_animation: bool,
    pub show_info_button: bool,
    pub labels: Labels,
}

impl Default for ScoreboardSettings {
    fn default() -> Self {
        Self {
            max_inning: 7,
            faint_opacity: 0.25,
            enable_inning: true,
            enable_out: true,
            enable_hr: true,
            auto_hr_animation: true,
            show_info_button: true,
            labels: Labels::default(),
        }
    }
}

/// Merge whatever keys `raw` carries over the defaults.
pub fn settings_from_value(raw: &Value) -> ScoreboardSettings {
    ScoreboardSettings::deserialize(raw).unwrap_or_else(|e| {
        warn!("Ignoring unreadable scoreboard settings: {}", e);
        ScoreboardSettings::default()
    })
}

/// Stored settings merged over the defaults. Unreadable data yields defaults.
pub fn load_settings(store: &impl KeyValueStore) -> ScoreboardSettings {
    let Some(raw) = store.get(SETTINGS_KEY) else {
        return ScoreboardSettings::default();
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => settings_from_value(&value),
        Err(e) => {
            warn!("Scoreboard settings are not valid JSON ({}), using defaults", e);
            ScoreboardSettings::default()
        }
    }
}

pub fn save_settings(
    store: &impl KeyValueStore,
    settings: &ScoreboardSettings,
) -> Result<(), StoreError> {
    let json =
        serde_json::to_string(settings).map_err(|e| StoreError::Serialize(e.to_string()))?;
    store.set(SETTINGS_KEY, &json)
}
