//! Footer component

use leptos::*;

use crate::config::SITE_NAME;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <div>"© " {SITE_NAME} " • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="mailto:SCI@gmail.com" class="footer-link">"SCI@gmail.com"</a>
                <a href="tel:+551140028922" class="footer-link">"(11) 4002-8922"</a>
            </div>
        </footer>
    }
}
