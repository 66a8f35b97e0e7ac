use gloo_timers::callback::Timeout;
use hr_animations::gesture::{HoldGesture, HoldRelease};
use log::debug;
use yew::prelude::*;

/// Milliseconds from the page's monotonic clock.
pub fn now_ms() -> f64 {
    gloo_utils::window()
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Event handlers produced by [`use_hold_gesture`].
#[derive(Clone)]
pub struct HoldHandlers {
    /// True while a press is running and has not fired yet.
    pub holding: bool,
    pub onpointerdown: Callback<PointerEvent>,
    pub onpointerup: Callback<PointerEvent>,
    /// Bind to both `pointerleave` and `pointercancel`.
    pub onpointerleave: Callback<PointerEvent>,
    /// Runs `on_tap` unless the click is the tail of a completed hold.
    pub onclick: Callback<MouseEvent>,
    /// Abort a running press from other handlers (e.g. a second touch).
    pub cancel: Callback<()>,
}

/// Custom hook wiring a [`HoldGesture`] to a cancellable timer.
///
/// `on_confirm` fires once when the press lasts `duration_ms`. `on_tap`
/// fires for ordinary clicks. `on_cancel` fires when a running press is
/// aborted before it completes.
#[hook]
pub fn use_hold_gesture(
    duration_ms: u32,
    on_confirm: Callback<()>,
    on_tap: Callback<()>,
    on_cancel: Callback<()>,
) -> HoldHandlers {
    let gesture = use_mut_ref(|| HoldGesture::new(duration_ms));
    let timer = use_mut_ref(|| None::<Timeout>);
    let holding = use_state(|| false);

    let onpointerdown = {
        let gesture = gesture.clone();
        let timer = timer.clone();
        let holding = holding.clone();
        let on_confirm = on_confirm.clone();
        Callback::from(move |e: PointerEvent| {
            // Only the primary button starts a hold; right clicks open the context menu.
            if e.button() > 0 {
                return;
            }
            gesture.borrow_mut().press(now_ms());
            holding.set(true);

            let gesture = gesture.clone();
            let holding = holding.clone();
            let on_confirm = on_confirm.clone();
            let handle = Timeout::new(duration_ms, move || {
                if gesture.borrow_mut().elapse() {
                    holding.set(false);
                    on_confirm.emit(());
                }
            });
            *timer.borrow_mut() = Some(handle);
        })
    };

    let onpointerup = {
        let gesture = gesture.clone();
        let timer = timer.clone();
        let holding = holding.clone();
        Callback::from(move |_: PointerEvent| {
            timer.borrow_mut().take();
            holding.set(false);
            let release = gesture.borrow_mut().release(now_ms());
            debug!("hold released: {:?}", release);
            // The duration passed before the timer got to run.
            if release == HoldRelease::Fired {
                on_confirm.emit(());
            }
        })
    };

    let cancel = {
        let gesture = gesture.clone();
        let timer = timer.clone();
        let holding = holding.clone();
        Callback::from(move |_: ()| {
            timer.borrow_mut().take();
            holding.set(false);
            if gesture.borrow_mut().cancel() {
                on_cancel.emit(());
            }
        })
    };

    let onpointerleave = {
        let cancel = cancel.clone();
        Callback::from(move |_: PointerEvent| cancel.emit(()))
    };

    let onclick = {
        let gesture = gesture.clone();
        Callback::from(move |e: MouseEvent| {
            if gesture.borrow_mut().take_click() {
                e.prevent_default();
                e.stop_propagation();
                return;
            }
            on_tap.emit(());
        })
    };

    // Drop any pending timer when the owning component unmounts.
    {
        let timer = timer.clone();
        use_effect_with((), move |_| move || drop(timer.borrow_mut().take()));
    }

    HoldHandlers {
        holding: *holding,
        onpointerdown,
        onpointerup,
        onpointerleave,
        onclick,
        cancel,
    }
}

