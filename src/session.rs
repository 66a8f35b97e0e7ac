//! In-progress edit of one slot: baseline, live form values and dirty state.

use crate::config::{DEFAULT_BG, DEFAULT_MESSAGE};
use crate::slot::{placeholder_image, DisplayMode, Slot, TextAnimation};

/// A single form input change.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotField {
    Message(String),
    BackgroundColor(String),
    Mode(DisplayMode),
    TextAnimation(TextAnimation),
}

/// Change to the staged image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageUpdate {
    /// A decoded payload picked by the user.
    Set(String),
    Clear,
}

/// Current values of the editor inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotForm {
    pub message: String,
    pub background_color: String,
    pub mode: DisplayMode,
    pub text_animation: TextAnimation,
}

impl SlotForm {
    fn from_slot(slot: &Slot) -> Self {
        Self {
            message: slot.message.clone(),
            background_color: slot.background_color.clone(),
            mode: slot.mode,
            text_animation: slot.text_animation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    index: usize,
    baseline: Slot,
    form: SlotForm,
    pending_image: String,
    dirty: bool,
}

impl EditSession {
    pub fn open(index: usize, slot: &Slot) -> Self {
        Self {
            index,
            baseline: slot.clone(),
            form: SlotForm::from_slot(slot),
            pending_image: slot.image.clone(),
            dirty: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn baseline(&self) -> &Slot {
        &self.baseline
    }

    pub fn form(&self) -> &SlotForm {
        &self.form
    }

    pub fn pending_image(&self) -> &str {
        &self.pending_image
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn update_field(&mut self, field: SlotField) {
        match field {
            SlotField::Message(m) => self.form.message = m,
            SlotField::BackgroundColor(c) => self.form.background_color = c,
            SlotField::Mode(m) => self.form.mode = m,
            SlotField::TextAnimation(a) => self.form.text_animation = a,
        }
        self.dirty = self.draft() != self.baseline;
    }

    /// Staging a new image switches the slot to image mode.
    pub fn set_image(&mut self, update: ImageUpdate) {
        match update {
            ImageUpdate::Set(payload) => {
                self.pending_image = payload;
                self.form.mode = DisplayMode::Image;
            }
            ImageUpdate::Clear => self.pending_image = placeholder_image().to_string(),
        }
        self.dirty = true;
    }

    /// Baseline overridden by the form values and the staged image.
    pub fn draft(&self) -> Slot {
        Slot {
            message: self.form.message.clone(),
            background_color: self.form.background_color.clone(),
            image: self.pending_image.clone(),
            mode: self.form.mode,
            text_animation: self.form.text_animation,
        }
    }

    /// The slot written on save: message trimmed, empty values defaulted.
    pub fn committed(&self) -> Slot {
        let mut slot = self.draft();
        let trimmed = slot.message.trim();
        slot.message = if trimmed.is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            trimmed.to_string()
        };
        if slot.background_color.is_empty() {
            slot.background_color = DEFAULT_BG.to_string();
        }
        if slot.image.is_empty() {
            slot.image = self.baseline.image.clone();
        }
        slot
    }

    /// Restart the session from `slot`, keeping it open on the same index.
    pub fn reseed(&mut self, slot: &Slot) {
        *self = Self::open(self.index, slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_team() -> Slot {
        Slot {
            message: "Go Team".into(),
            background_color: "#0047ab".into(),
            image: placeholder_image().into(),
            mode: DisplayMode::Message,
            text_animation: TextAnimation::Flash,
        }
    }

    #[test]
    fn fresh_session_is_clean() {
        let session = EditSession::open(3, &go_team());
        assert!(!session.is_dirty());
        assert_eq!(session.index(), 3);
        assert_eq!(session.draft(), go_team());
    }

    #[test]
    fn changing_a_field_marks_dirty() {
        let mut session = EditSession::open(3, &go_team());
        session.update_field(SlotField::Message("Nice Hit!".into()));
        assert!(session.is_dirty());
        assert_eq!(session.draft().message, "Nice Hit!");
        assert_eq!(session.baseline().message, "Go Team");
    }

    #[test]
    fn changing_back_clears_dirty() {
        let mut session = EditSession::open(0, &go_team());
        session.update_field(SlotField::TextAnimation(TextAnimation::Spin));
        assert!(session.is_dirty());
        session.update_field(SlotField::TextAnimation(TextAnimation::Flash));
        assert!(!session.is_dirty());
    }

    #[test]
    fn setting_image_forces_image_mode() {
        let mut session = EditSession::open(1, &go_team());
        session.set_image(ImageUpdate::Set("data:image/png;base64,AAAA".into()));
        assert!(session.is_dirty());
        assert_eq!(session.form().mode, DisplayMode::Image);
        assert_eq!(session.pending_image(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn clearing_image_stages_placeholder() {
        let mut slot = go_team();
        slot.image = "data:image/png;base64,AAAA".into();
        let mut session = EditSession::open(1, &slot);
        session.set_image(ImageUpdate::Clear);
        assert_eq!(session.pending_image(), placeholder_image());
        assert!(session.is_dirty());
    }

    #[test]
    fn committed_trims_and_defaults() {
        let mut session = EditSession::open(2, &go_team());
        session.update_field(SlotField::Message("   ".into()));
        session.update_field(SlotField::BackgroundColor(String::new()));
        let slot = session.committed();
        assert_eq!(slot.message, DEFAULT_MESSAGE);
        assert_eq!(slot.background_color, DEFAULT_BG);

        session.update_field(SlotField::Message("  Homer!  ".into()));
        assert_eq!(session.committed().message, "Homer!");
    }

    #[test]
    fn reseed_keeps_index_and_clears_dirty() {
        let mut session = EditSession::open(5, &go_team());
        session.update_field(SlotField::Mode(DisplayMode::Both));
        session.reseed(&Slot::default());
        assert_eq!(session.index(), 5);
        assert!(!session.is_dirty());
        assert_eq!(session.draft(), Slot::default());
    }
}
