//! Thread-local cache of still frames for animated images.
//!
//! Animated slot images render frozen until hovered, so every animated
//! payload needs a static first frame. Extraction decodes the whole image,
//! which is far too slow to repeat on every render; results are kept here
//! for the lifetime of the page. The UI thread fills its copy from worker
//! replies, and the worker keeps its own so a repeated request is answered
//! without decoding again.
//!
//! # Cache Key Structure
//! - the source image payload (the full `data:` URL)
//!
//! # Cache Value Structure
//! - a PNG `data:` URL of the first frame

use crate::media::{extract_first_frame, MediaError};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    /// Global cache that survives component lifetimes.
    /// Thread-local: wasm runs the UI on a single thread, so no locking.
    pub static FRAME_CACHE: RefCell<HashMap<String, String>> =
        RefCell::new(HashMap::with_capacity(16));
}

pub fn cached_frame(source: &str) -> Option<String> {
    FRAME_CACHE.with(|c| c.borrow().get(source).cloned())
}

pub fn remember_frame(source: String, frame: String) {
    FRAME_CACHE.with(|c| {
        c.borrow_mut().insert(source, frame);
    });
}

/// Still frame for `source`, extracting it on first request.
pub fn first_frame(source: &str) -> Result<String, MediaError> {
    if let Some(frame) = cached_frame(source) {
        return Ok(frame);
    }
    let frame = extract_first_frame(source)?;
    remember_frame(source.to_string(), frame.clone());
    Ok(frame)
}

#[cfg(test)]
pub(crate) fn frame_cache_len() -> usize {
    FRAME_CACHE.with(|c| c.borrow().len())
}

#[cfg(test)]
pub(crate) fn clear_frame_cache() {
    FRAME_CACHE.with(|c| c.borrow_mut().clear());
}
