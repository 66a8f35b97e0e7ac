//! Main module for the home-run animation editor using Yew.
//! Wires the slot store, the frame worker and browser events into the UI.

use hr_animations::cache::{cached_frame, remember_frame};
use hr_animations::config::*;
use hr_animations::layout::{allows_vertical_scroll, compute_grid_layout, GridLayout};
use hr_animations::media::is_animated_format;
use hr_animations::session::{ImageUpdate, SlotField};
use hr_animations::store::{KeyValueStore, LocalStore, MemoryStore};
use hr_animations::utils::slot_for_key;
use hr_animations::worker_agent::{FrameArgs, FrameTask};
use hr_animations::{ScoreboardAnimationStore, SessionError};
use log::{error, info, warn, LevelFilter};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_agent::reactor::{use_reactor_subscription, ReactorProvider};

mod components;
mod files;
mod hooks;

use components::{Editor, FullscreenOverlay, SlotCell};
use files::read_image_file;

// ──────────────────────────────────────────────────────────────────────────────
// Type aliases for better readability
type Board = ScoreboardAnimationStore<Rc<dyn KeyValueStore>>;
type BoardRef = Rc<RefCell<Board>>;

/// What the fullscreen overlay is showing.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Fullscreen {
    Slot(usize),
    /// The editor's unsaved draft.
    Draft,
}

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// `localStorage`, or an in-memory store when the browser refuses access.
fn open_store() -> Rc<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            warn!("{}; changes will not survive a reload", e);
            Rc::new(MemoryStore::new())
        }
    }
}

/// Helper to bump the render version after the board changed
fn update_version(version: &UseStateHandle<usize>) {
    version.set(version.wrapping_add(1));
}

/// Grid layout for the current window size.
fn measure_layout() -> GridLayout {
    let window = gloo_utils::window();
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    compute_grid_layout(
        (width - 2.0 * PAGE_PADDING_PX).max(0.0),
        (height - HEADER_HEIGHT_PX - 2.0 * PAGE_PADDING_PX).max(0.0),
        GRID_GAP_PX,
        allows_vertical_scroll(width),
    )
}

/// Callback running `action` on the board, logging failures and re-rendering.
fn board_callback<T: 'static>(
    board: &BoardRef,
    version: &UseStateHandle<usize>,
    action: impl Fn(&mut Board, T) -> Result<(), SessionError> + 'static,
) -> Callback<T> {
    let board = board.clone();
    let version = version.clone();
    Callback::from(move |arg: T| {
        if let Err(e) = action(&mut board.borrow_mut(), arg) {
            error!("{}", e);
        }
        update_version(&version);
    })
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let board: BoardRef = use_mut_ref(|| Board::load(open_store()));
    // Version state triggers a re-render whenever the board or frame cache changes
    let version = use_state(|| 0usize);
    let layout = use_state(measure_layout);
    let fullscreen = use_state(|| None::<Fullscreen>);
    let frame_sub = use_reactor_subscription::<FrameTask>();
    let handled_idx = use_mut_ref(|| 0usize); // number of worker messages already processed
    let requested_frames = use_mut_ref(HashSet::<String>::new);

    // Re-layout the grid on every resize
    {
        let layout = layout.clone();
        use_effect_with((), move |_| {
            let window = gloo_utils::window();
            let listener = Closure::<dyn Fn()>::new(move || layout.set(measure_layout()));
            let _ = window
                .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            move || {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    listener.as_ref().unchecked_ref(),
                );
            }
        });
    }

    // Escape closes the overlay; slot keys preview while no editor is open
    {
        let fullscreen = fullscreen.clone();
        let board = board.clone();
        use_effect_with((), move |_| {
            let document = gloo_utils::document();
            let listener = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                let key = e.key();
                if key == "Escape" {
                    fullscreen.set(None);
                    return;
                }
                if board.borrow().editing_index().is_some() {
                    return;
                }
                if let Some(index) = slot_for_key(&key) {
                    fullscreen.set(Some(Fullscreen::Slot(index)));
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            move || {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                );
            }
        });
    }

    // Ask the worker for still frames of animated images not seen before
    {
        let frame_sub = frame_sub.clone();
        let board = board.clone();
        let requested_frames = requested_frames.clone();
        use_effect_with(*version, move |_| {
            let board = board.borrow();
            let draft = board.draft();
            let sources = board
                .slots()
                .iter()
                .map(|slot| &slot.image)
                .chain(draft.as_ref().map(|d| &d.image));
            for source in sources {
                if is_animated_format(source)
                    && cached_frame(source).is_none()
                    && requested_frames.borrow_mut().insert(source.clone())
                {
                    frame_sub.send(FrameArgs {
                        source: source.clone(),
                    });
                }
            }
            || ()
        });
    }

    // effect that consumes new worker messages
    {
        let frame_consumer = frame_sub.clone();
        let handled_idx = handled_idx.clone();
        let version = version.clone();
        use_effect_with(frame_sub.len(), move |_| {
            let all = frame_consumer.iter();
            let new_total = all.len();
            let mut fresh = false;
            for msg in all.skip(*handled_idx.borrow()) {
                match msg.as_ref() {
                    Ok((source, frame)) => {
                        remember_frame(source.clone(), frame.clone());
                        fresh = true;
                    }
                    // The image keeps rendering as-is; it just never freezes.
                    Err((_, e)) => warn!("Still frame extraction failed: {}", e),
                }
            }
            *handled_idx.borrow_mut() = new_total;
            if fresh {
                update_version(&version);
            }
            || ()
        });
    }

    // --- Grid callbacks ---
    let on_edit = board_callback(&board, &version, |b, index: usize| b.open(index));
    let on_reset = board_callback(&board, &version, |b, index: usize| b.reset_slot(index));
    let on_preview = {
        let fullscreen = fullscreen.clone();
        Callback::from(move |index: usize| fullscreen.set(Some(Fullscreen::Slot(index))))
    };

    // --- Editor callbacks ---
    let on_field = board_callback(&board, &version, |b, field: SlotField| b.update_field(field));
    let on_clear_image =
        board_callback(&board, &version, |b, _: ()| b.set_image(ImageUpdate::Clear));
    let on_save = board_callback(&board, &version, |b, _: ()| {
        let index = b.save()?;
        info!("Slot {} saved", index);
        Ok(())
    });
    let on_cancel = board_callback(&board, &version, |b, _: ()| b.cancel());
    let on_reset_session = board_callback(&board, &version, |b, _: ()| b.reset_within_session());
    let on_preview_draft = {
        let fullscreen = fullscreen.clone();
        Callback::from(move |_: ()| fullscreen.set(Some(Fullscreen::Draft)))
    };
    let on_file = {
        let board = board.clone();
        let version = version.clone();
        Callback::from(move |file: web_sys::File| {
            let Some(target) = board.borrow().editing_index() else {
                return;
            };
            let board = board.clone();
            let version = version.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match read_image_file(file).await {
                    Ok(payload) => {
                        // The editor may have moved on while the file was read.
                        if board.borrow_mut().apply_loaded_image(target, payload) {
                            update_version(&version);
                        }
                    }
                    Err(e) => warn!("{}", e),
                }
            });
        })
    };
    let close_fullscreen = {
        let fullscreen = fullscreen.clone();
        Callback::from(move |_: ()| fullscreen.set(None))
    };

    // Ensure re-render on board updates by reading version
    let _ = *version;
    let board_view = board.borrow();
    let grid_style = format!(
        "grid-template-columns: {}; gap: {}px;",
        layout.template_columns(),
        GRID_GAP_PX
    );

    let cells = board_view
        .slots()
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            html! {
                <SlotCell key={index}
                          {index}
                          slot={slot.clone()}
                          still_frame={cached_frame(&slot.image)}
                          width={layout.cell_width}
                          height={layout.cell_height}
                          on_edit={on_edit.clone()}
                          on_preview={on_preview.clone()}
                          on_reset={on_reset.clone()} />
            }
        })
        .collect::<Html>();

    let editor = board_view.session().map(|session| {
        let draft = session.draft();
        html! {
            <Editor index={session.index()}
                    still_frame={cached_frame(&draft.image)}
                    {draft}
                    dirty={session.is_dirty()}
                    {on_field}
                    {on_file}
                    {on_clear_image}
                    {on_save}
                    {on_cancel}
                    on_reset={on_reset_session}
                    on_preview={on_preview_draft} />
        }
    });

    let overlay = (*fullscreen).and_then(|target| match target {
        Fullscreen::Slot(index) => board_view.slot(index).cloned(),
        Fullscreen::Draft => board_view.draft(),
    });

    html! {
        <div class={classes!("app", layout.scroll.then_some("scrolling"))}>
            <header>
                <h1>{ "Home Run Animations" }</h1>
                <p class="hint">
                    { "Tap a slot to edit it. Hold or right-click to preview. Hold Reset to restore defaults." }
                </p>
            </header>
            <main class="grid" style={grid_style}>
                { cells }
            </main>
            if let Some(editor) = editor {
                { editor }
            }
            if let Some(slot) = overlay {
                <FullscreenOverlay {slot} on_close={close_fullscreen} />
            }
        </div>
    }
}

/// App wrapper providing ReactorProvider for FrameTask.
#[function_component]
pub fn App() -> Html {
    html! {
        <ReactorProvider<FrameTask> path={WORKER_SCRIPT}>
            <Main />
        </ReactorProvider<FrameTask>>
    }
}

/// Entry point: installs logging and renders the App.
fn main() {
    console_error_panic_hook::set_once();
    hr_animations::logging::init(LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
