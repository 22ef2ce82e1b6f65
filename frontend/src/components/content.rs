//! Content region.
//!
//! Holds the markup of the current page. Form and project-card handlers are
//! attached here once and reach the swapped-in markup through bubbling.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::bootstrap::{post_render, AppContext};
use crate::config::CONTENT_REGION_ID;
use crate::forms;

#[component]
pub fn ContentRegion() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let page = ctx.page;

    // Post-render pass once the new markup is in the DOM.
    create_effect(move |_| {
        if page.with(|p| p.is_some()) {
            request_animation_frame(post_render);
        }
    });

    let content = move || page.with(|p| p.as_ref().map(|p| p.content.clone()).unwrap_or_default());

    let submit_ctx = ctx.clone();
    let modal = ctx.modal;

    view! {
        <main
            id=CONTENT_REGION_ID
            class="container"
            tabindex="-1"
            inner_html=content
            on:submit=move |ev| forms::handle_submit(&submit_ctx, ev)
            on:input=move |ev| forms::handle_input(&ev)
            on:focusout=move |ev| forms::handle_blur(&ev)
            on:click=move |ev| {
                let key = ev
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(".btn-more[data-project]").ok().flatten())
                    .and_then(|btn| btn.get_attribute("data-project"));
                if let Some(key) = key {
                    modal.open_project(&key);
                }
            }
        ></main>
    }
}
