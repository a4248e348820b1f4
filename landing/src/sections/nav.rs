use academy::config::ContactSettings;
use leptos::prelude::*;

use super::BRAND;

#[component]
pub fn Nav(contact: ContactSettings) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let close_menu = move |_| set_menu_open.set(false);

    view! {
        <nav class="nav">
            <div class="nav-inner">
                <a href="/" class="nav-brand">
                    <span class="nav-logo">"🎓"</span>
                    <span class="nav-title">{BRAND}</span>
                </a>
                <div class=move || if menu_open.get() { "nav-links open" } else { "nav-links" }>
                    <a href="/courses" class="nav-link" on:click=close_menu>"Courses"</a>
                    <a href="#lectures" class="nav-link" on:click=close_menu>"Special Lectures"</a>
                    <a href="#mobile-app" class="nav-link" on:click=close_menu>"Mobile App"</a>
                    <a href=contact.tel_href() class="nav-cta">{contact.phone.clone()}</a>
                </div>
                <button
                    class="nav-toggle"
                    aria-label="Menu"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>
        </nav>
    }
}
