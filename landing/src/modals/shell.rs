use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use academy::modal::{Dismissal, ModalState, OverlayCount};
use leptos::prelude::*;
use tracing::debug;

thread_local! {
    static OPEN_OVERLAYS: Cell<OverlayCount> = Cell::new(OverlayCount::default());
}

/// Keep the page behind an open overlay from scrolling.
fn lock_page_scroll(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    if let Err(err) = body.class_list().toggle_with_force("modal-open", locked) {
        debug!(locked, ?err, "could not toggle page scroll lock");
    }
}

/// One overlay opened or closed; the page stays locked while any is open.
fn overlay_edge(was_open: bool, is_open: bool) {
    let locked = OPEN_OVERLAYS.with(|overlays| {
        let mut count = overlays.get();
        let locked = count.transition(was_open, is_open);
        overlays.set(count);
        locked
    });
    lock_page_scroll(locked);
}

/// Backdrop + panel. Clicks on the backdrop close it, clicks inside the panel
/// don't; both are ignored while the state is locked.
#[component]
pub fn Modal(
    state: RwSignal<ModalState>,
    #[prop(optional)] wide: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let dismiss = move |via: Dismissal| {
        state.update(|modal| {
            modal.request_close(via);
        });
    };

    let shown = Arc::new(AtomicBool::new(false));
    Effect::new({
        let shown = Arc::clone(&shown);
        move |_| {
            let is_open = state.with(ModalState::is_open);
            let was_open = shown.swap(is_open, Ordering::Relaxed);
            overlay_edge(was_open, is_open);
        }
    });
    on_cleanup(move || {
        if shown.swap(false, Ordering::Relaxed) {
            overlay_edge(true, false);
        }
    });

    let panel_class = if wide { "modal-panel modal-wide" } else { "modal-panel" };

    view! {
        <Show when=move || state.with(ModalState::is_open)>
            <div class="modal-backdrop" on:click=move |_| dismiss(Dismissal::Backdrop)>
                <div class=panel_class on:click=|ev| ev.stop_propagation()>
                    <button
                        class="modal-close"
                        aria-label="Close"
                        disabled=move || state.with(ModalState::is_locked)
                        on:click=move |_| dismiss(Dismissal::CloseButton)
                    >
                        "×"
                    </button>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
