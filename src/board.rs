//! The slot collection and its edit session behind one owner.
//!
//! [`ScoreboardAnimationStore`] is the only way to change slots: the UI
//! calls its methods and re-renders from [`ScoreboardAnimationStore::slots`]
//! and [`ScoreboardAnimationStore::draft`].

use crate::config::SLOT_COUNT;
use crate::session::{EditSession, ImageUpdate, SlotField};
use crate::slot::{Slot, SlotArray};
use crate::store::{load_slots, save_slots, KeyValueStore, StoreError};
use log::{info, warn};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The operation needs an open editor.
    NotOpen,
    IndexOutOfRange(usize),
    /// In-memory state changed but persisting it failed.
    Store(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotOpen => write!(f, "No slot is being edited"),
            SessionError::IndexOutOfRange(i) => {
                write!(f, "Slot {} does not exist (0-{})", i, SLOT_COUNT - 1)
            }
            SessionError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        SessionError::Store(e)
    }
}

pub struct ScoreboardAnimationStore<S: KeyValueStore> {
    store: S,
    slots: SlotArray,
    session: Option<EditSession>,
}

impl<S: KeyValueStore> ScoreboardAnimationStore<S> {
    pub fn load(store: S) -> Self {
        let slots = load_slots(&store);
        Self {
            store,
            slots,
            session: None,
        }
    }

    pub fn slots(&self) -> &SlotArray {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.session.as_ref().map(EditSession::index)
    }

    pub fn is_dirty(&self) -> bool {
        self.session.as_ref().is_some_and(EditSession::is_dirty)
    }

    /// Merged, unsaved view of the slot being edited.
    pub fn draft(&self) -> Option<Slot> {
        self.session.as_ref().map(EditSession::draft)
    }

    /// Start editing `index`, replacing any open session.
    pub fn open(&mut self, index: usize) -> Result<(), SessionError> {
        let slot = self
            .slots
            .get(index)
            .ok_or(SessionError::IndexOutOfRange(index))?;
        self.session = Some(EditSession::open(index, slot));
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, SessionError> {
        self.session.as_mut().ok_or(SessionError::NotOpen)
    }

    pub fn update_field(&mut self, field: SlotField) -> Result<(), SessionError> {
        self.session_mut()?.update_field(field);
        Ok(())
    }

    pub fn set_image(&mut self, update: ImageUpdate) -> Result<(), SessionError> {
        self.session_mut()?.set_image(update);
        Ok(())
    }

    /// Apply a file read that finished asynchronously.
    ///
    /// Returns `false` and drops the payload when the editor was closed or
    /// moved to another slot while the read was in flight.
    pub fn apply_loaded_image(&mut self, target_index: usize, payload: String) -> bool {
        let editing = self.editing_index();
        match self.session.as_mut() {
            Some(session) if editing == Some(target_index) => {
                session.set_image(ImageUpdate::Set(payload));
                true
            }
            _ => {
                warn!(
                    "Dropping image loaded for slot {}: editor is on {:?}",
                    target_index, editing
                );
                false
            }
        }
    }

    /// Commit the draft, persist all slots and close the editor.
    pub fn save(&mut self) -> Result<usize, SessionError> {
        let session = self.session.take().ok_or(SessionError::NotOpen)?;
        let index = session.index();
        self.slots[index] = session.committed();
        info!("Saved animation slot {}", index);
        save_slots(&self.store, &self.slots)?;
        Ok(index)
    }

    /// Close the editor, discarding every pending change.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.session.take().map(|_| ()).ok_or(SessionError::NotOpen)
    }

    /// Return `index` to defaults and persist immediately.
    ///
    /// An editor open on the same slot is re-seeded from the defaults.
    pub fn reset_slot(&mut self, index: usize) -> Result<(), SessionError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange(index))?;
        *slot = Slot::default();
        info!("Reset animation slot {}", index);
        if let Some(session) = self.session.as_mut().filter(|s| s.index() == index) {
            session.reseed(&self.slots[index]);
        }
        save_slots(&self.store, &self.slots)?;
        Ok(())
    }

    /// Reset the slot being edited, leaving the editor open and clean.
    pub fn reset_within_session(&mut self) -> Result<(), SessionError> {
        let index = self.editing_index().ok_or(SessionError::NotOpen)?;
        self.reset_slot(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{placeholder_image, DisplayMode, TextAnimation};
    use crate::store::MemoryStore;
    use crate::view::editor_preview_view;
    use std::rc::Rc;

    fn board() -> (Rc<MemoryStore>, ScoreboardAnimationStore<Rc<MemoryStore>>) {
        let store = Rc::new(MemoryStore::new());
        let board = ScoreboardAnimationStore::load(store.clone());
        (store, board)
    }

    #[test]
    fn open_starts_clean_and_edits_mark_dirty() {
        let (_, mut board) = board();
        board.open(3).unwrap();
        assert!(!board.is_dirty());
        board
            .update_field(SlotField::Message("Nice Hit!".into()))
            .unwrap();
        assert!(board.is_dirty());

        board.open(4).unwrap();
        assert!(!board.is_dirty());
        assert_eq!(board.editing_index(), Some(4));
    }

    #[test]
    fn cancelled_edit_leaves_slot_untouched() {
        let (_, mut board) = board();
        board.open(3).unwrap();
        board
            .update_field(SlotField::Message("Nice Hit!".into()))
            .unwrap();
        assert_eq!(board.draft().unwrap().message, "Nice Hit!");
        assert!(board.is_dirty());
        let preview = editor_preview_view(&board.draft().unwrap(), false, None);
        assert_eq!(preview.text.unwrap().content, "Nice Hit!");
        assert_eq!(board.slots()[3].message, "Go Team");

        board.cancel().unwrap();
        assert_eq!(board.editing_index(), None);

        board.open(3).unwrap();
        assert_eq!(board.draft().unwrap().message, "Go Team");
        assert_eq!(board.draft().unwrap().image, placeholder_image());
    }

    #[test]
    fn save_persists_and_closes() {
        let (store, mut board) = board();
        board.open(7).unwrap();
        board
            .update_field(SlotField::Message("  Grand Slam  ".into()))
            .unwrap();
        board
            .update_field(SlotField::TextAnimation(TextAnimation::Zoom))
            .unwrap();
        assert_eq!(board.save(), Ok(7));
        assert!(!board.is_dirty());
        assert_eq!(board.session(), None);

        let reloaded = load_slots(&store);
        assert_eq!(reloaded[7].message, "Grand Slam");
        assert_eq!(reloaded[7].text_animation, TextAnimation::Zoom);
        assert_eq!(&reloaded, board.slots());
    }

    #[test]
    fn operations_require_open_session() {
        let (_, mut board) = board();
        assert_eq!(
            board.update_field(SlotField::Mode(DisplayMode::Both)),
            Err(SessionError::NotOpen)
        );
        assert_eq!(board.set_image(ImageUpdate::Clear), Err(SessionError::NotOpen));
        assert_eq!(board.save(), Err(SessionError::NotOpen));
        assert_eq!(board.cancel(), Err(SessionError::NotOpen));
        assert_eq!(board.reset_within_session(), Err(SessionError::NotOpen));
        assert_eq!(board.open(10), Err(SessionError::IndexOutOfRange(10)));
    }

    #[test]
    fn reset_restores_defaults_immediately() {
        let (store, mut board) = board();
        board.open(5).unwrap();
        board
            .update_field(SlotField::BackgroundColor("#dc143c".into()))
            .unwrap();
        board.save().unwrap();
        assert_eq!(load_slots(&store)[5].background_color, "#dc143c");

        board.reset_slot(5).unwrap();
        assert_eq!(load_slots(&store)[5], Slot::default());
        assert_eq!(board.slots()[5], Slot::default());
    }

    #[test]
    fn reset_within_session_reseeds_editor() {
        let (store, mut board) = board();
        board.open(2).unwrap();
        board
            .update_field(SlotField::Message("Going, going".into()))
            .unwrap();
        board.save().unwrap();

        board.open(2).unwrap();
        board
            .set_image(ImageUpdate::Set("data:image/png;base64,AAAA".into()))
            .unwrap();
        board.reset_within_session().unwrap();

        assert_eq!(board.editing_index(), Some(2));
        assert!(!board.is_dirty());
        assert_eq!(board.draft(), Some(Slot::default()));
        assert_eq!(load_slots(&store)[2], Slot::default());
    }

    #[test]
    fn stale_image_loads_are_dropped() {
        let (_, mut board) = board();
        board.open(1).unwrap();
        board.open(6).unwrap();
        assert!(!board.apply_loaded_image(1, "data:image/png;base64,AAAA".into()));
        assert!(!board.is_dirty());

        assert!(board.apply_loaded_image(6, "data:image/png;base64,AAAA".into()));
        assert_eq!(board.draft().unwrap().mode, DisplayMode::Image);

        board.cancel().unwrap();
        assert!(!board.apply_loaded_image(6, "data:image/png;base64,BBBB".into()));
    }

    #[test]
    fn saved_image_survives_reload() {
        let (store, mut board) = board();
        board.open(0).unwrap();
        assert!(board.apply_loaded_image(0, "data:image/png;base64,AAAA".into()));
        board.save().unwrap();

        let reloaded = ScoreboardAnimationStore::load(store);
        assert_eq!(reloaded.slots()[0].image, "data:image/png;base64,AAAA");
        assert_eq!(reloaded.slots()[0].mode, DisplayMode::Image);
    }
}
