use leptos::*;

use crate::bootstrap::AppContext;
use crate::config::SITE_NAME;
use crate::router::ContentSource;
use crate::types::Route;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let menu_open = ctx.menu_open;
    let page = ctx.page;

    let current = move || page.with(|p| p.as_ref().and_then(|p| p.route));
    let home_href = ctx.source().href_for(Route::Home);

    let links = Route::NAV
        .into_iter()
        .map(|route| {
            let href = ctx.source().href_for(route);
            let is_active = move || current() == Some(route);
            view! {
                <a
                    href=href
                    class="nav-link"
                    class:active=is_active
                    aria-current=move || is_active().then_some("page")
                    data-route=""
                >
                    {route.label()}
                </a>
            }
        })
        .collect_view();

    view! {
        <header class="site-header">
            <a href=home_href class="logo" data-route="">{SITE_NAME}</a>
            <button
                id="menu-toggle"
                class="menu-toggle"
                type="button"
                aria-controls="navbar"
                aria-label="Abrir menu"
                aria-expanded=move || menu_open.get().to_string()
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                "☰"
            </button>
            <nav id="navbar" class="navbar" class:open=move || menu_open.get()>
                {links}
            </nav>
        </header>
    }
}
