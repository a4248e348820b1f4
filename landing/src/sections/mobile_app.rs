use academy::config::LeadSettings;
use academy::lead::AppInterestDraft;
use academy::modal::ModalState;
use academy::table::TableClient;
use leptos::prelude::*;

use super::BRAND;
use crate::forms::LeadFormHandle;
use crate::modals::{AppInfoModal, AppNotificationModal};

/// Source page recorded for launch notifications requested here.
const SOURCE_PAGE: &str = "mobile-app-section";

const HIGHLIGHTS: [(&str, &str, &str); 4] = [
    ("⬇️", "Study on the Go", "Access all course content from your smartphone"),
    ("🖥️", "Never Miss a Class", "Live streaming and recorded sessions"),
    ("💬", "Instant Help", "Chat with faculty and clear doubts immediately"),
    ("📈", "Track Your Progress", "Real-time performance analytics"),
];

const FEATURES: [(&str, &str, &str); 8] = [
    ("⏰", "24/7 Lecture Access", "Access recorded classes anytime, anywhere"),
    ("💬", "Instant Doubt Clearing", "Get your doubts resolved within minutes"),
    ("✉️", "Direct Faculty Messaging", "Chat directly with your teachers"),
    ("🖥️", "Live Class Integration", "Attend live classes from your phone"),
    ("⬇️", "Offline Downloads", "Download lectures for offline study"),
    ("📈", "Performance Tracking", "Track your progress with detailed analytics"),
    ("🔔", "Smart Notifications", "Never miss a class or assignment"),
    ("📚", "Digital Study Library", "Complete study materials in your pocket"),
];

const STATS: [(&str, &str); 4] = [
    ("🚀", "Launching Soon"),
    ("👥", "Built for 10,000+ Students"),
    ("📱", "iOS & Android"),
    ("🎁", "100% Free for Enrolled Students"),
];

#[component]
fn FeatureCard(icon: &'static str, title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <div class="feature-card">
            <span class="feature-icon">{icon}</span>
            <div>
                <h4>{title}</h4>
                <p>{description}</p>
            </div>
        </div>
    }
}

/// "Coming Soon" promotion for the mobile app.
#[component]
pub fn MobileApp(client: TableClient, leads: LeadSettings) -> impl IntoView {
    let info = RwSignal::new(ModalState::default());
    let notify = RwSignal::new(ModalState::default());
    let form = LeadFormHandle::<AppInterestDraft>::new(client, &leads, notify);
    form.set_source_page(SOURCE_PAGE);

    view! {
        <section id="mobile-app" class="mobile-app">
            <div class="container">
                <div class="section-header">
                    <span class="badge badge-rose">"🚀 Coming Soon"</span>
                    <h2 class="section-title">
                        "Your Success Story Starts Here"
                        <br />
                        <span class="section-subtitle">"Now Available on Mobile"</span>
                    </h2>
                    <p class="section-description">
                        {format!("{BRAND} App - Learn Anytime, Anywhere with 24/7 Support")}
                    </p>
                </div>

                <div class="app-grid">
                    <div class="phone-mockup">
                        <div class="phone-screen">
                            <span class="phone-icon">"📖"</span>
                            <h3>"The Advanced" <br /> "Learning Academy"</h3>
                            <p>"Your Success, Always With You"</p>
                        </div>
                    </div>

                    <div class="app-pitch">
                        <h3>"Designed for Modern Learners Like You"</h3>
                        <div class="highlight-list">
                            {HIGHLIGHTS
                                .into_iter()
                                .map(|(icon, title, description)| view! { <FeatureCard icon title description /> })
                                .collect_view()}
                        </div>

                        <div class="download-panel">
                            <h4>"Download the App"</h4>
                            <p>"Launching Soon for iOS & Android"</p>
                            <div class="store-buttons">
                                <span class="store-button" title="Coming Soon">" App Store"</span>
                                <span class="store-button" title="Coming Soon">"▶ Google Play"</span>
                            </div>
                            <button class="btn btn-outline btn-block" on:click=move |_| info.update(ModalState::open)>
                                "Learn More About the App"
                            </button>
                            <button class="btn btn-rose btn-block" on:click=move |_| notify.update(ModalState::open)>
                                "Get Notified at Launch"
                            </button>
                        </div>
                    </div>
                </div>

                <h3 class="features-title">"Powerful Features at Your Fingertips"</h3>
                <div class="feature-grid">
                    {FEATURES
                        .into_iter()
                        .map(|(icon, title, description)| view! { <FeatureCard icon title description /> })
                        .collect_view()}
                </div>

                <div class="stats-grid">
                    {STATS
                        .into_iter()
                        .map(|(icon, text)| view! {
                            <div class="stat-card">
                                <span class="stat-icon">{icon}</span>
                                <p>{text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>

            <AppInfoModal modal=info notify />
            <AppNotificationModal modal=notify form />
        </section>
    }
}
