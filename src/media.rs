//! Helpers for embedded image payloads and text contrast.

use crate::config::{DARK_TEXT, DEFAULT_BG, LIGHT_TEXT};
use crate::slot::{is_placeholder, is_valid_hex_color};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::ImageFormat;
use std::fmt;
use std::io::Cursor;

const ANIMATED_MIME_TYPES: [&str; 2] = ["image/gif", "image/apng"];

#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    NotDataUrl,
    UnsupportedEncoding,
    Base64(String),
    Decode(String),
    Encode(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NotDataUrl => write!(f, "Image is not an embedded data URL"),
            MediaError::UnsupportedEncoding => write!(f, "Image payload is not base64 encoded"),
            MediaError::Base64(e) => write!(f, "Invalid base64 payload: {}", e),
            MediaError::Decode(e) => write!(f, "Could not decode image: {}", e),
            MediaError::Encode(e) => write!(f, "Could not encode image: {}", e),
        }
    }
}

impl std::error::Error for MediaError {}

/// The parts of a `data:` URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub mime: &'a str,
    pub is_base64: bool,
    pub data: &'a str,
}

impl<'a> DataUrl<'a> {
    pub fn parse(url: &'a str) -> Result<Self, MediaError> {
        let rest = url.strip_prefix("data:").ok_or(MediaError::NotDataUrl)?;
        let (header, data) = rest.split_once(',').ok_or(MediaError::NotDataUrl)?;
        let mut params = header.split(';');
        let mime = params.next().unwrap_or_default();
        let is_base64 = params.any(|p| p.eq_ignore_ascii_case("base64"));
        Ok(Self {
            mime,
            is_base64,
            data,
        })
    }

    pub fn decode(&self) -> Result<Vec<u8>, MediaError> {
        if !self.is_base64 {
            return Err(MediaError::UnsupportedEncoding);
        }
        BASE64
            .decode(self.data.trim())
            .map_err(|e| MediaError::Base64(e.to_string()))
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Byte length of the decoded payload; `None` when it cannot be decoded.
pub fn decoded_byte_size(image: &str) -> Option<usize> {
    let url = DataUrl::parse(image).ok()?;
    if url.is_base64 {
        url.decode().ok().map(|bytes| bytes.len())
    } else {
        Some(url.data.len())
    }
}

/// Size label for a slot image. The placeholder counts as empty.
pub fn image_size_label(image: &str) -> String {
    if is_placeholder(image) {
        return format_byte_size(0);
    }
    match decoded_byte_size(image) {
        Some(bytes) => format_byte_size(bytes),
        None => "?".to_string(),
    }
}

pub fn format_byte_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}

/// True when the declared format can hold more than one frame.
pub fn is_animated_format(image: &str) -> bool {
    DataUrl::parse(image)
        .map(|url| {
            ANIMATED_MIME_TYPES
                .iter()
                .any(|m| url.mime.eq_ignore_ascii_case(m))
        })
        .unwrap_or(false)
}

/// Decode the first frame of `source` and re-encode it as a static PNG.
pub fn extract_first_frame(source: &str) -> Result<String, MediaError> {
    let bytes = DataUrl::parse(source)?.decode()?;
    let frame = image::load_from_memory(&bytes).map_err(|e| MediaError::Decode(e.to_string()))?;
    let mut png = Cursor::new(Vec::new());
    frame
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| MediaError::Encode(e.to_string()))?;
    Ok(encode_data_url("image/png", &png.into_inner()))
}

/// Luminance formula and the threshold above which dark text is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContrastRule {
    /// WCAG relative luminance (sRGB linearised, 0.2126/0.7152/0.0722), threshold 0.5.
    #[default]
    Relative,
    /// Perceived brightness (0.299/0.587/0.114 on raw channels), threshold 140/255.
    Perceived,
}

impl ContrastRule {
    /// Luminance of an RGB triple on a 0..=1 scale.
    pub fn luminance(self, [r, g, b]: [u8; 3]) -> f64 {
        let channel = |v: u8| v as f64 / 255.0;
        match self {
            ContrastRule::Relative => {
                let linear = |v: f64| {
                    if v <= 0.03928 {
                        v / 12.92
                    } else {
                        ((v + 0.055) / 1.055).powf(2.4)
                    }
                };
                0.2126 * linear(channel(r)) + 0.7152 * linear(channel(g)) + 0.0722 * linear(channel(b))
            }
            ContrastRule::Perceived => 0.299 * channel(r) + 0.587 * channel(g) + 0.114 * channel(b),
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            ContrastRule::Relative => 0.5,
            ContrastRule::Perceived => 140.0 / 255.0,
        }
    }
}

/// Parse `#rrggbb`.
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    if !is_valid_hex_color(color) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&color[i..i + 2], 16).ok();
    Some([channel(1)?, channel(3)?, channel(5)?])
}

/// Dark or light text, whichever reads better on `color`.
/// Invalid colours are judged as the default background.
pub fn contrasting_text_color(color: &str, rule: ContrastRule) -> &'static str {
    let rgb = parse_hex_color(color)
        .or_else(|| parse_hex_color(DEFAULT_BG))
        .unwrap_or([0, 0, 0]);
    if rule.luminance(rgb) > rule.threshold() {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Red-then-blue two frame GIF used by tests across the crate.
#[cfg(test)]
pub(crate) fn two_frame_gif() -> String {
    let mut bytes = Vec::new();
    {
        let mut encoder = image::codecs::gif::GifEncoder::new(&mut bytes);
        let red = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let blue = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 255, 255]));
        let delay = image::Delay::from_numer_denom_ms(100, 1);
        encoder
            .encode_frames(vec![
                image::Frame::from_parts(red, 0, 0, delay),
                image::Frame::from_parts(blue, 0, 0, delay),
            ])
            .unwrap();
    }
    encode_data_url("image/gif", &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::placeholder_image;
    use image::Rgba;

    #[test]
    fn parses_data_url_parts() {
        let url = DataUrl::parse("data:image/gif;base64,R0lGODlh").unwrap();
        assert_eq!(url.mime, "image/gif");
        assert!(url.is_base64);
        assert_eq!(url.data, "R0lGODlh");
        assert_eq!(DataUrl::parse("http://x/y.png"), Err(MediaError::NotDataUrl));
    }

    #[test]
    fn byte_size_of_payload() {
        assert_eq!(decoded_byte_size(&encode_data_url("image/png", &[1, 2, 3, 4, 5])), Some(5));
        assert_eq!(decoded_byte_size("data:image/png;base64,@@@"), None);
        assert_eq!(decoded_byte_size("garbage"), None);
    }

    #[test]
    fn placeholder_size_label_is_zero() {
        assert_eq!(image_size_label(placeholder_image()), "0 B");
        assert_eq!(image_size_label(&encode_data_url("image/png", &[0; 2048])), "2.0 KB");
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_byte_size(0), "0 B");
        assert_eq!(format_byte_size(1023), "1023 B");
        assert_eq!(format_byte_size(1536), "1.5 KB");
        assert_eq!(format_byte_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn detects_animated_formats() {
        assert!(is_animated_format("data:image/gif;base64,AAAA"));
        assert!(is_animated_format("data:image/GIF;base64,AAAA"));
        assert!(!is_animated_format("data:image/png;base64,AAAA"));
        assert!(!is_animated_format(placeholder_image()));
        assert!(!is_animated_format("not a url"));
    }

    #[test]
    fn first_frame_is_static_png_of_frame_one() {
        let still = extract_first_frame(&two_frame_gif()).unwrap();
        assert!(still.starts_with("data:image/png;base64,"));

        let bytes = DataUrl::parse(&still).unwrap().decode().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        let Rgba([r, _, b, _]) = *decoded.get_pixel(0, 0);
        assert!(r > 200 && b < 50, "expected the red first frame, got {:?}", (r, b));
    }

    #[test]
    fn first_frame_of_garbage_fails() {
        let err = extract_first_frame(&encode_data_url("image/gif", b"definitely not a gif"));
        assert!(matches!(err, Err(MediaError::Decode(_))));
    }

    #[test]
    fn contrast_extremes() {
        for rule in [ContrastRule::Relative, ContrastRule::Perceived] {
            assert_eq!(contrasting_text_color("#000000", rule), LIGHT_TEXT);
            assert_eq!(contrasting_text_color("#ffffff", rule), DARK_TEXT);
        }
    }

    #[test]
    fn contrast_rules_disagree_near_the_boundary() {
        // Mid grey: perceived 0.502 (< 0.549), relative 0.216 (< 0.5) -> both light.
        assert_eq!(contrasting_text_color("#808080", ContrastRule::Relative), LIGHT_TEXT);
        assert_eq!(contrasting_text_color("#808080", ContrastRule::Perceived), LIGHT_TEXT);
        // #00ff00: relative 0.7152 -> dark; perceived 0.587 -> dark.
        assert_eq!(contrasting_text_color("#00ff00", ContrastRule::Relative), DARK_TEXT);
        // #c0c0c0: perceived 0.753 -> dark; relative 0.527 -> dark.
        assert_eq!(contrasting_text_color("#c0c0c0", ContrastRule::Perceived), DARK_TEXT);
        // #00bfff: perceived 0.554 -> dark; relative 0.448 -> light.
        assert_eq!(contrasting_text_color("#00bfff", ContrastRule::Perceived), DARK_TEXT);
        assert_eq!(contrasting_text_color("#00bfff", ContrastRule::Relative), LIGHT_TEXT);
    }

    #[test]
    fn invalid_colour_uses_default_background() {
        assert_eq!(
            contrasting_text_color("teal", ContrastRule::Relative),
            contrasting_text_color(DEFAULT_BG, ContrastRule::Relative)
        );
    }
}
