//! Yew view components for the animation slot editor.
//!
//! Components render the pure view models from `hr_animations::view`; all
//! state changes go back to the parent through callbacks.

use crate::hooks::use_hold_gesture;
use hr_animations::config::{PREVIEW_HOLD_MS, RESET_HOLD_MS};
use hr_animations::gesture::TouchHover;
use hr_animations::session::SlotField;
use hr_animations::slot::{DisplayMode, Slot, TextAnimation};
use hr_animations::utils::slot_label;
use hr_animations::view::{editor_preview_view, fullscreen_view, grid_cell_view, SlotView};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Draws one slot view model inside a surface element.
pub fn render_slot_view(view: &SlotView, class: &'static str) -> Html {
    html! {
        <div class={classes!("slot-surface", class)}
             style={format!("background: {};", view.background)}>
            if let Some(img) = &view.image {
                <img class={classes!("slot-image", img.animated.then_some("animated"))}
                     src={img.src.clone()}
                     alt=""
                     draggable="false" />
            }
            if let Some(text) = &view.text {
                <span class={classes!("slot-text", text.animation_class)}
                      style={format!("color: {};", text.color)}>
                    { text.content.clone() }
                </span>
            }
            if let Some(label) = &view.size_label {
                <span class="size-label">{ label.clone() }</span>
            }
        </div>
    }
}

/// Button that only acts after being held down.
#[derive(Properties, PartialEq)]
pub struct HoldButtonProps {
    pub label: AttrValue,
    #[prop_or(RESET_HOLD_MS)]
    pub duration_ms: u32,
    pub on_confirm: Callback<()>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(HoldButton)]
pub fn hold_button(props: &HoldButtonProps) -> Html {
    let hold = use_hold_gesture(
        props.duration_ms,
        props.on_confirm.clone(),
        Callback::noop(),
        Callback::noop(),
    );

    // Keep presses on the button from reaching the cell underneath.
    let onpointerdown = {
        let inner = hold.onpointerdown.clone();
        Callback::from(move |e: PointerEvent| {
            e.stop_propagation();
            inner.emit(e);
        })
    };
    let onclick = {
        let inner = hold.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            inner.emit(e);
        })
    };

    html! {
        <button type="button"
                class={classes!("hold-button", props.class.clone(), hold.holding.then_some("holding"))}
                style={format!("--hold-ms: {}ms;", props.duration_ms)}
                title="Press and hold"
                {onpointerdown}
                onpointerup={hold.onpointerup.clone()}
                onpointerleave={hold.onpointerleave.clone()}
                onpointercancel={hold.onpointerleave.clone()}
                {onclick}>
            { props.label.clone() }
        </button>
    }
}

/// One cell of the slot grid.
#[derive(Properties, PartialEq)]
pub struct SlotCellProps {
    pub index: usize,
    pub slot: Slot,
    pub still_frame: Option<String>,
    pub width: f64,
    pub height: f64,
    pub on_edit: Callback<usize>,
    pub on_preview: Callback<usize>,
    pub on_reset: Callback<usize>,
}

#[function_component(SlotCell)]
pub fn slot_cell(props: &SlotCellProps) -> Html {
    let hovered = use_state(|| false);
    let touch = use_mut_ref(TouchHover::default);
    let index = props.index;

    let hold = use_hold_gesture(
        PREVIEW_HOLD_MS,
        props.on_preview.reform(move |_: ()| index),
        props.on_edit.reform(move |_: ()| index),
        Callback::noop(),
    );

    let oncontextmenu = {
        let on_preview = props.on_preview.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_preview.emit(index);
        })
    };

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    let ontouchstart = {
        let hovered = hovered.clone();
        let touch = touch.clone();
        let cancel_hold = hold.cancel.clone();
        Callback::from(move |e: TouchEvent| {
            let mut touch = touch.borrow_mut();
            touch.touch_start(e.touches().length());
            if touch.is_hovering() {
                cancel_hold.emit(());
                hovered.set(true);
            }
        })
    };
    let ontouchend = {
        let hovered = hovered.clone();
        let touch = touch.clone();
        Callback::from(move |e: TouchEvent| {
            let mut touch = touch.borrow_mut();
            touch.touch_end(e.touches().length());
            if !touch.is_hovering() {
                hovered.set(false);
            }
        })
    };

    let view = grid_cell_view(&props.slot, *hovered, props.still_frame.as_deref());
    let on_reset = props.on_reset.reform(move |_: ()| index);

    html! {
        <div class={classes!("cell", (*hovered).then_some("hovered"))}
             style={format!("width: {}px; height: {}px;", props.width, props.height)}
             onpointerdown={hold.onpointerdown.clone()}
             onpointerup={hold.onpointerup.clone()}
             onpointerleave={hold.onpointerleave.clone()}
             onpointercancel={hold.onpointerleave.clone()}
             onclick={hold.onclick.clone()}
             {oncontextmenu}
             {onmouseenter}
             {onmouseleave}
             {ontouchstart}
             ontouchend={ontouchend.clone()}
             ontouchcancel={ontouchend}>
            { render_slot_view(&view, "thumb") }
            <span class="slot-number">{ slot_label(index) }</span>
            <HoldButton label="Reset" class="reset" on_confirm={on_reset} />
        </div>
    }
}

/// Editor dialog for the slot currently being edited.
#[derive(Properties, PartialEq)]
pub struct EditorProps {
    pub index: usize,
    pub draft: Slot,
    pub dirty: bool,
    pub still_frame: Option<String>,
    pub on_field: Callback<SlotField>,
    pub on_file: Callback<web_sys::File>,
    pub on_clear_image: Callback<()>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_preview: Callback<()>,
}

#[function_component(Editor)]
pub fn editor(props: &EditorProps) -> Html {
    let preview_hovered = use_state(|| false);
    let draft = &props.draft;

    let on_message = props.on_field.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        SlotField::Message(input.value())
    });
    let on_color = props.on_field.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        SlotField::BackgroundColor(input.value())
    });
    let on_mode = {
        let on_field = props.on_field.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(mode) = DisplayMode::parse(&select.value()) {
                on_field.emit(SlotField::Mode(mode));
            }
        })
    };
    let on_animation = {
        let on_field = props.on_field.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(style) = TextAnimation::parse(&select.value()) {
                on_field.emit(SlotField::TextAnimation(style));
            }
        })
    };
    let on_file = {
        let on_file = props.on_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_file.emit(file);
            }
            input.set_value("");
        })
    };

    let on_preview_enter = {
        let preview_hovered = preview_hovered.clone();
        Callback::from(move |_: MouseEvent| preview_hovered.set(true))
    };
    let on_preview_leave = {
        let preview_hovered = preview_hovered.clone();
        Callback::from(move |_: MouseEvent| preview_hovered.set(false))
    };

    let view = editor_preview_view(draft, *preview_hovered, props.still_frame.as_deref());
    let prevent_submit = Callback::from(|e: SubmitEvent| e.prevent_default());

    html! {
        <div class="editor-backdrop">
            <form class="editor" onsubmit={prevent_submit}>
                <h2>
                    { format!("Edit slot {}", slot_label(props.index)) }
                    if props.dirty {
                        <span class="dirty-flag">{ "Unsaved changes" }</span>
                    }
                </h2>
                <div class="live-preview"
                     onmouseenter={on_preview_enter}
                     onmouseleave={on_preview_leave}>
                    { render_slot_view(&view, "live") }
                </div>
                <label>
                    { "Message" }
                    <input type="text" value={draft.message.clone()} oninput={on_message} />
                </label>
                <label>
                    { "Background" }
                    <input type="color" value={draft.background_color.clone()} oninput={on_color} />
                </label>
                <label>
                    { "Show" }
                    <select onchange={on_mode}>
                        { for DisplayMode::ALL.iter().map(|m| html! {
                            <option value={m.as_str()} selected={*m == draft.mode}>{ m.as_str() }</option>
                        }) }
                    </select>
                </label>
                <label>
                    { "Text animation" }
                    <select onchange={on_animation}>
                        { for TextAnimation::ALL.iter().map(|a| html! {
                            <option value={a.as_str()} selected={*a == draft.text_animation}>{ a.as_str() }</option>
                        }) }
                    </select>
                </label>
                <label>
                    { "Image" }
                    <input type="file" accept="image/*" onchange={on_file} />
                </label>
                <div class="editor-actions">
                    <button type="button" onclick={props.on_clear_image.reform(|_: MouseEvent| ())}>{ "Clear image" }</button>
                    <button type="button" onclick={props.on_preview.reform(|_: MouseEvent| ())}>{ "Preview" }</button>
                    <HoldButton label="Hold to reset" on_confirm={props.on_reset.clone()} />
                    <button type="button" onclick={props.on_cancel.reform(|_: MouseEvent| ())}>{ "Cancel" }</button>
                    <button type="button" class="primary" onclick={props.on_save.reform(|_: MouseEvent| ())}>{ "Save" }</button>
                </div>
            </form>
        </div>
    }
}

/// Full-viewport preview; any click dismisses it.
#[derive(Properties, PartialEq)]
pub struct FullscreenProps {
    pub slot: Slot,
    pub on_close: Callback<()>,
}

#[function_component(FullscreenOverlay)]
pub fn fullscreen_overlay(props: &FullscreenProps) -> Html {
    let view = fullscreen_view(&props.slot);
    html! {
        <div class="fullscreen" onclick={props.on_close.reform(|_: MouseEvent| ())}>
            { render_slot_view(&view, "fullscreen-surface") }
        </div>
    }
}
