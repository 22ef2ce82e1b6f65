//! Shared modal dialog.

use leptos::*;

use crate::bootstrap::AppContext;

#[component]
pub fn Modal() -> impl IntoView {
    let modal = expect_context::<AppContext>().modal;
    let state = modal.state();

    // Only clicks on the backdrop itself close the dialog.
    let on_backdrop_click = move |ev: ev::MouseEvent| {
        let on_backdrop = match (ev.target(), ev.current_target()) {
            (Some(target), Some(current)) => js_sys::Object::is(&target, &current),
            _ => false,
        };
        if on_backdrop {
            modal.close();
        }
    };

    view! {
        <div
            id="modal-backdrop"
            class="modal-backdrop"
            class:show=move || state.with(|s| s.open)
            on:click=on_backdrop_click
        >
            <div class="modal" role="dialog" aria-modal="true" aria-labelledby="modal-title">
                <h2 id="modal-title">{move || state.with(|s| s.title.clone())}</h2>
                <p id="modal-text">{move || state.with(|s| s.text.clone())}</p>
                <button
                    type="button"
                    class="btn btn-primary"
                    data-modal-close=""
                    on:click=move |_| modal.close()
                >
                    "Fechar"
                </button>
            </div>
        </div>
    }
}
