//! Toast notification element.

use leptos::*;

use crate::bootstrap::AppContext;

/// Rendered on first use, then reused for every message.
#[component]
pub fn Toast() -> impl IntoView {
    let state = expect_context::<AppContext>().toaster.state();

    view! {
        <Show
            when=move || state.with(|s| s.is_created())
            fallback=|| ()
        >
            <div
                id="site-toast"
                class="toast"
                class:show=move || state.with(|s| s.visible)
                role="status"
                aria-live="polite"
            >
                {move || state.with(|s| s.message.clone())}
            </div>
        </Show>
    }
}
