use crate::shared::scroll_lock;
use std::cell::RefCell;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

/// Mount order of open frames; only the last one answers Escape
#[derive(Debug, Default)]
pub struct FrameStack {
    ids: Vec<u64>,
    next_id: u64,
}

impl FrameStack {
    pub fn push(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.ids.push(id);
        id
    }

    /// Frames may unmount in any order
    pub fn remove(&mut self, id: u64) {
        self.ids.retain(|&open| open != id);
    }

    pub fn is_top(&self, id: u64) -> bool {
        self.ids.last() == Some(&id)
    }
}

thread_local! {
    static FRAMES: RefCell<FrameStack> = RefCell::new(FrameStack::default());
}

/// Modal frame container (overlay + positioned surface).
///
/// Renders no header; the content brings its own. Page scrolling is locked while the
/// frame is mounted.
#[component]
pub fn ModalFrame(
    /// Called when the modal should close (overlay click, Escape).
    on_close: Callback<()>,
    /// Close when clicking on the overlay (default: true).
    #[prop(optional)]
    close_on_overlay: Option<bool>,
    /// z-index for overlay stacking (default: 1000).
    #[prop(optional)]
    z_index: Option<i32>,
    /// Extra class for the modal surface (`div.modal`).
    #[prop(optional)]
    modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let close_on_overlay = close_on_overlay.unwrap_or(true);
    let z_index = z_index.unwrap_or(1000);
    let overlay_mouse_down = RwSignal::new(false);

    let lock = scroll_lock::acquire();
    let frame_id = FRAMES.with(|frames| frames.borrow_mut().push());
    on_cleanup(move || {
        FRAMES.with(|frames| frames.borrow_mut().remove(frame_id));
        drop(lock);
    });

    // Defer close to next tick: the overlay may be removed during its own event dispatch
    let close_deferred = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
            let is_top = FRAMES.with(|frames| frames.borrow().is_top(frame_id));
            if keyboard_event.key() == "Escape" && is_top {
                close_deferred();
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    }
    let keydown = StoredValue::new_local(Some(keydown));
    on_cleanup(move || {
        if let Some(keydown) = keydown.try_update_value(|k| k.take()).flatten() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown.as_ref().unchecked_ref(),
                );
            }
        }
    });

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only if both press and release happened on the overlay itself, so a text
    // selection dragged outside the surface does not dismiss the modal.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            close_on_overlay && overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            close_deferred();
        }
    };

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let surface_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=surface_class style="position: relative;" on:click=stop_propagation>
                {children()}
            </div>
        </div>
    }
}
