//! Pure view models for the three places a slot is drawn.
//!
//! The grid, the editor's live preview and the fullscreen overlay all share
//! one composition rule ([`compose`]); they only differ in the backdrop used
//! behind images, whether the size label is shown, and when text animates.
//! Nothing here touches the DOM, the yew components render these structs.

use crate::config::{GRID_IMAGE_BG, LIGHT_TEXT, PREVIEW_IMAGE_BG};
use crate::media::{contrasting_text_color, image_size_label, is_animated_format, ContrastRule};
use crate::slot::{DisplayMode, Slot};

/// Contrast rule used by every animation view.
pub const VIEW_CONTRAST: ContrastRule = ContrastRule::Relative;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Grid,
    Editor,
    Fullscreen,
}

impl Surface {
    fn image_backdrop(self) -> &'static str {
        match self {
            Surface::Grid => GRID_IMAGE_BG,
            Surface::Editor | Surface::Fullscreen => PREVIEW_IMAGE_BG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub src: String,
    /// True when `src` is the moving original rather than a still frame.
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    pub content: String,
    pub color: String,
    pub animation_class: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub background: String,
    pub image: Option<ImageView>,
    pub text: Option<TextView>,
    pub size_label: Option<String>,
}

/// Project a slot onto `surface`.
///
/// `hovered` reveals motion: animated text classes and the moving original
/// of an animated image. `still_frame` is the cached first frame of the
/// slot image, when one has been extracted.
pub fn compose(slot: &Slot, surface: Surface, hovered: bool, still_frame: Option<&str>) -> SlotView {
    let image = slot.mode.shows_image().then(|| {
        let frozen = is_animated_format(&slot.image) && !hovered;
        match still_frame.filter(|_| frozen) {
            Some(frame) => ImageView {
                src: frame.to_string(),
                animated: false,
            },
            None => ImageView {
                src: slot.image.clone(),
                animated: is_animated_format(&slot.image),
            },
        }
    });

    let text = slot.mode.shows_text().then(|| {
        let color = if slot.mode == DisplayMode::Both {
            LIGHT_TEXT
        } else {
            contrasting_text_color(&slot.background_color, VIEW_CONTRAST)
        };
        TextView {
            content: slot.message.clone(),
            color: color.to_string(),
            animation_class: if hovered {
                slot.text_animation.css_class()
            } else {
                None
            },
        }
    });

    let background = if image.is_some() {
        surface.image_backdrop().to_string()
    } else {
        slot.background_color.clone()
    };

    SlotView {
        background,
        image,
        text,
        size_label: (surface == Surface::Grid).then(|| image_size_label(&slot.image)),
    }
}

pub fn grid_cell_view(slot: &Slot, hovered: bool, still_frame: Option<&str>) -> SlotView {
    compose(slot, Surface::Grid, hovered, still_frame)
}

/// Live preview of the editor's draft.
pub fn editor_preview_view(draft: &Slot, hovered: bool, still_frame: Option<&str>) -> SlotView {
    compose(draft, Surface::Editor, hovered, still_frame)
}

/// The fullscreen overlay always plays its animations.
pub fn fullscreen_view(slot: &Slot) -> SlotView {
    compose(slot, Surface::Fullscreen, true, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DARK_TEXT, DEFAULT_BG};
    use crate::slot::{placeholder_image, TextAnimation};

    fn slot(mode: DisplayMode, image: &str) -> Slot {
        Slot {
            message: "Go Team".into(),
            background_color: DEFAULT_BG.into(),
            image: image.into(),
            mode,
            text_animation: TextAnimation::Flash,
        }
    }

    #[test]
    fn message_mode_uses_slot_colour() {
        let view = grid_cell_view(&slot(DisplayMode::Message, placeholder_image()), false, None);
        assert_eq!(view.background, DEFAULT_BG);
        assert!(view.image.is_none());
        let text = view.text.unwrap();
        assert_eq!(text.content, "Go Team");
        assert_eq!(text.color, LIGHT_TEXT);
        assert_eq!(text.animation_class, None);
        assert_eq!(view.size_label.as_deref(), Some("0 B"));
    }

    #[test]
    fn light_background_gets_dark_text() {
        let mut s = slot(DisplayMode::Message, placeholder_image());
        s.background_color = "#ffffff".into();
        assert_eq!(grid_cell_view(&s, false, None).text.unwrap().color, DARK_TEXT);
    }

    #[test]
    fn image_mode_shows_placeholder_on_dark_backdrop() {
        let view = editor_preview_view(&slot(DisplayMode::Image, placeholder_image()), false, None);
        assert_eq!(view.background, PREVIEW_IMAGE_BG);
        assert_eq!(view.image.unwrap().src, placeholder_image());
        assert!(view.text.is_none());
        assert!(view.size_label.is_none());
    }

    #[test]
    fn both_mode_overlays_text() {
        let view = grid_cell_view(&slot(DisplayMode::Both, "data:image/png;base64,AAAA"), true, None);
        assert_eq!(view.background, GRID_IMAGE_BG);
        assert!(view.image.is_some());
        let text = view.text.unwrap();
        assert_eq!(text.color, LIGHT_TEXT);
        assert_eq!(text.animation_class, Some("anim-flash"));
    }

    #[test]
    fn animated_images_freeze_until_hovered() {
        let gif = slot(DisplayMode::Image, "data:image/gif;base64,R0lG");

        let idle = grid_cell_view(&gif, false, Some("data:image/png;base64,STILL"));
        let img = idle.image.unwrap();
        assert_eq!(img.src, "data:image/png;base64,STILL");
        assert!(!img.animated);

        let hovered = grid_cell_view(&gif, true, Some("data:image/png;base64,STILL"));
        let img = hovered.image.unwrap();
        assert_eq!(img.src, "data:image/gif;base64,R0lG");
        assert!(img.animated);
    }

    #[test]
    fn animated_image_without_frame_shows_source() {
        let gif = slot(DisplayMode::Image, "data:image/gif;base64,R0lG");
        let view = grid_cell_view(&gif, false, None);
        assert_eq!(view.image.unwrap().src, "data:image/gif;base64,R0lG");
    }

    #[test]
    fn fullscreen_always_animates() {
        let view = fullscreen_view(&slot(DisplayMode::Message, placeholder_image()));
        assert_eq!(view.text.unwrap().animation_class, Some("anim-flash"));
    }

    #[test]
    fn no_animation_style_has_no_class() {
        let mut s = slot(DisplayMode::Message, placeholder_image());
        s.text_animation = TextAnimation::None;
        assert_eq!(fullscreen_view(&s).text.unwrap().animation_class, None);
    }
}
