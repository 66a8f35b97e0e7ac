//! Application-level configuration constants.

// Storage
pub const STORAGE_KEY: &str = "ss.animations.v1";
pub const SETTINGS_KEY: &str = "scoreboardSettings";
pub const SLOT_COUNT: usize = 10;

// Slot defaults
pub const DEFAULT_MESSAGE: &str = "Go Team";
pub const DEFAULT_BG: &str = "#0047ab";

// Backdrops behind images
pub const GRID_IMAGE_BG: &str = "#111111";
pub const PREVIEW_IMAGE_BG: &str = "#000000";

// Text colours picked by the contrast rule
pub const DARK_TEXT: &str = "#000000";
pub const LIGHT_TEXT: &str = "#ffffff";

// Gestures
pub const RESET_HOLD_MS: u32 = 900;
pub const PREVIEW_HOLD_MS: u32 = 550;

// Grid layout
pub const GRID_GAP_PX: f64 = 8.0;
pub const NARROW_BREAKPOINT_PX: f64 = 700.0;
pub const CELL_ASPECT: f64 = 16.0 / 9.0;
pub const PAGE_PADDING_PX: f64 = 16.0;
pub const HEADER_HEIGHT_PX: f64 = 64.0;

pub const WORKER_SCRIPT: &str = "worker.js";
