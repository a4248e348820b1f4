use academy::config::ContactSettings;
use leptos::prelude::*;

use super::BRAND;

#[component]
pub fn Footer(contact: ContactSettings) -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="container">
                <div class="footer-brand">
                    <span class="footer-logo">"🎓"</span>
                    <span class="footer-title">{BRAND}</span>
                </div>
                <div class="footer-links">
                    <a href="/courses" class="footer-link">"Courses"</a>
                    <a href="#lectures" class="footer-link">"Special Lectures"</a>
                    <a href="#mobile-app" class="footer-link">"Mobile App"</a>
                    <a href=contact.tel_href() class="footer-link">{format!("Toll free: {}", contact.phone)}</a>
                </div>
                <p class="footer-copyright">
                    "Coaching for RRB, SSC and Banking examinations."
                </p>
            </div>
        </footer>
    }
}
