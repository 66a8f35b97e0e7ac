//! Canonical slot shape, defaults and normalization of untrusted data.
//!
//! A slot is one of the ten fixed animation records shown when a home run
//! is celebrated. Whatever is read back from storage passes through
//! [`normalize`] so the rest of the crate only ever sees valid slots.

use crate::config::{DEFAULT_BG, DEFAULT_MESSAGE, SLOT_COUNT};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{ImageFormat, Rgb, RgbImage};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Cursor;

static HEX_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

/// Marker every embedded image payload starts with.
pub const IMAGE_DATA_PREFIX: &str = "data:image";

const PLACEHOLDER_SIDE: u32 = 4;
const PLACEHOLDER_PALETTE: [[u8; 3]; 16] = [
    [0xe6, 0x19, 0x4b],
    [0x3c, 0xb4, 0x4b],
    [0xff, 0xe1, 0x19],
    [0x43, 0x63, 0xd8],
    [0xf5, 0x82, 0x31],
    [0x91, 0x1e, 0xb4],
    [0x42, 0xd4, 0xf4],
    [0xf0, 0x32, 0xe6],
    [0xbf, 0xef, 0x45],
    [0xfa, 0xbe, 0xd4],
    [0x46, 0x99, 0x90],
    [0xdc, 0xbe, 0xff],
    [0x9a, 0x63, 0x24],
    [0xff, 0xfa, 0xc8],
    [0x80, 0x00, 0x00],
    [0x00, 0x00, 0x75],
];

static PLACEHOLDER_IMAGE: Lazy<String> = Lazy::new(|| {
    let img = RgbImage::from_fn(PLACEHOLDER_SIDE, PLACEHOLDER_SIDE, |x, y| {
        Rgb(PLACEHOLDER_PALETTE[(y * PLACEHOLDER_SIDE + x) as usize])
    });
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)
        .expect("in-memory PNG encoding of a 4x4 image cannot fail");
    format!("data:image/png;base64,{}", BASE64.encode(png.into_inner()))
});

/// Which parts of a slot are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Message,
    Image,
    Both,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Message, DisplayMode::Image, DisplayMode::Both];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Message => "message",
            DisplayMode::Image => "image",
            DisplayMode::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }

    pub fn shows_text(self) -> bool {
        matches!(self, DisplayMode::Message | DisplayMode::Both)
    }

    pub fn shows_image(self) -> bool {
        matches!(self, DisplayMode::Image | DisplayMode::Both)
    }
}

/// Animation applied to the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnimation {
    None,
    Flash,
    Zoom,
    Spin,
}

impl TextAnimation {
    pub const ALL: [TextAnimation; 4] = [
        TextAnimation::None,
        TextAnimation::Flash,
        TextAnimation::Zoom,
        TextAnimation::Spin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextAnimation::None => "none",
            TextAnimation::Flash => "flash",
            TextAnimation::Zoom => "zoom",
            TextAnimation::Spin => "spin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }

    /// CSS class that runs the animation, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TextAnimation::None => None,
            TextAnimation::Flash => Some("anim-flash"),
            TextAnimation::Zoom => Some("anim-zoom"),
            TextAnimation::Spin => Some("anim-spin"),
        }
    }
}

/// One animation record. Field names match the persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub message: String,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
    /// Embedded image payload; never empty, the placeholder stands for "no image".
    pub image: String,
    pub mode: DisplayMode,
    #[serde(rename = "textAnimationStyle")]
    pub text_animation: TextAnimation,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            background_color: DEFAULT_BG.to_string(),
            image: placeholder_image().to_string(),
            mode: DisplayMode::Message,
            text_animation: TextAnimation::Flash,
        }
    }
}

impl Slot {
    /// True when a user-supplied image is set.
    pub fn has_real_image(&self) -> bool {
        !is_placeholder(&self.image)
    }
}

pub type SlotArray = [Slot; SLOT_COUNT];

pub fn default_slots() -> SlotArray {
    std::array::from_fn(|_| Slot::default())
}

/// Deterministic multi-colour raster meaning "no image set".
pub fn placeholder_image() -> &'static str {
    PLACEHOLDER_IMAGE.as_str()
}

pub fn is_placeholder(image: &str) -> bool {
    image == placeholder_image()
}

pub fn is_valid_hex_color(value: &str) -> bool {
    HEX_COLOR_REGEX.is_match(value)
}

/// Look up `key`, falling back to the key used by the first storage format.
fn field<'a>(raw: &'a Value, key: &str, legacy: Option<&str>) -> Option<&'a Value> {
    raw.get(key)
        .or_else(|| legacy.and_then(|legacy_key| raw.get(legacy_key)))
}

/// Turn arbitrary JSON into a valid slot, repairing each field on its own.
pub fn normalize(raw: &Value) -> Slot {
    let message = match field(raw, "message", None).and_then(Value::as_str) {
        Some(m) => m.to_string(),
        None => {
            debug!("slot message missing or not a string, using default");
            DEFAULT_MESSAGE.to_string()
        }
    };

    let background_color = match field(raw, "backgroundColor", Some("bg")).and_then(Value::as_str) {
        Some(c) if is_valid_hex_color(c) => c.to_string(),
        other => {
            debug!("slot colour {:?} rejected, using default", other);
            DEFAULT_BG.to_string()
        }
    };

    let image = match field(raw, "image", Some("img")).and_then(Value::as_str) {
        Some(img) if img.starts_with(IMAGE_DATA_PREFIX) => img.to_string(),
        _ => placeholder_image().to_string(),
    };

    let mode = field(raw, "mode", None)
        .and_then(Value::as_str)
        .and_then(DisplayMode::parse)
        .unwrap_or_else(|| {
            if is_placeholder(&image) {
                DisplayMode::Message
            } else {
                DisplayMode::Image
            }
        });

    let text_animation = field(raw, "textAnimationStyle", None)
        .and_then(Value::as_str)
        .and_then(TextAnimation::parse)
        .unwrap_or(TextAnimation::Flash);

    Slot {
        message,
        background_color,
        image,
        mode,
        text_animation,
    }
}
