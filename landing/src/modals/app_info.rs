use academy::modal::{Dismissal, ModalState};
use leptos::prelude::*;

use super::Modal;

const DETAILED_FEATURES: [(&str, &str, &str); 8] = [
    (
        "⏰",
        "24/7 Lecture Access",
        "Access thousands of recorded lectures anytime, anywhere. Whether you're traveling, at home, or taking a break, your learning never stops.",
    ),
    (
        "💬",
        "Instant Doubt Clearing",
        "Snap a photo of your question or type it in the app, and our expert faculty will respond within minutes.",
    ),
    (
        "✉️",
        "Direct Faculty Messaging",
        "Your teachers, always just a message away. Ask questions, seek guidance and get the support you need to excel.",
    ),
    (
        "🖥️",
        "Live Class Integration",
        "Attend live interactive classes right from your smartphone and take part in real-time discussions.",
    ),
    (
        "⬇️",
        "Offline Mode",
        "Download lectures and study materials for offline viewing. Perfect for commutes and areas with limited connectivity.",
    ),
    (
        "📈",
        "Performance Analytics",
        "See your strengths, identify areas for improvement and watch your performance improve with data-driven learning.",
    ),
    (
        "🔔",
        "Smart Notifications",
        "Get reminded about upcoming classes, assignment deadlines, doubt responses and personalized study suggestions.",
    ),
    (
        "📚",
        "Digital Study Library",
        "Textbooks, notes, practice papers and previous year questions, all organized and searchable.",
    ),
];

const BENEFITS: [&str; 6] = [
    "Study at your own pace with flexible scheduling",
    "Save time with organized, searchable content",
    "Stay motivated with progress tracking and achievements",
    "Connect with peers through study groups",
    "Access expert guidance whenever you need it",
    "Prepare efficiently with smart study plans",
];

const FAQS: [(&str, &str); 4] = [
    (
        "Is the app really free?",
        "Yes! The app is 100% free for all enrolled students. No hidden fees, no premium tiers.",
    ),
    (
        "Will my progress sync across devices?",
        "Your progress, bookmarks, notes and preferences sync automatically across all your devices.",
    ),
    (
        "How fast is the doubt clearing?",
        "Most doubts are cleared within 2-5 minutes during active hours, and within 30 minutes off-hours.",
    ),
    (
        "Can I use the app without internet?",
        "Download lectures, notes and study materials while online, then access them offline anytime.",
    ),
];

/// Long-form description of the upcoming app. The closing call to action
/// hands over to the launch notification form.
#[component]
pub fn AppInfoModal(modal: RwSignal<ModalState>, notify: RwSignal<ModalState>) -> impl IntoView {
    let open_notify = move |_| {
        modal.update(|m| {
            m.request_close(Dismissal::Programmatic);
        });
        notify.update(ModalState::open);
    };

    view! {
        <Modal state=modal wide=true>
            <div class="modal-header modal-header-rose">
                <h2>"📱 The Advanced Learning Academy App"</h2>
                <p>"Your Success, Always With You"</p>
            </div>

            <div class="modal-body">
                <h3>"Transform Your Learning Experience"</h3>
                <p>
                    "The Advanced Learning Academy mobile app gives you complete control over your learning journey. "
                    "Study smarter with tools built specifically for competitive exam preparation."
                </p>

                <h3>"Powerful Features Designed For You"</h3>
                <div class="feature-grid">
                    {DETAILED_FEATURES
                        .into_iter()
                        .map(|(icon, title, description)| view! {
                            <div class="feature-card">
                                <span class="feature-icon">{icon}</span>
                                <div>
                                    <h4>{title}</h4>
                                    <p>{description}</p>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>

                <div class="benefits">
                    <h3>"Why Students Love Our App"</h3>
                    <ul>
                        {BENEFITS.into_iter().map(|benefit| view! { <li>"✓ " {benefit}</li> }).collect_view()}
                    </ul>
                </div>

                <h3>"Frequently Asked Questions"</h3>
                <div class="faq-list">
                    {FAQS
                        .into_iter()
                        .map(|(question, answer)| view! {
                            <div class="faq">
                                <h4>{question}</h4>
                                <p>{answer}</p>
                            </div>
                        })
                        .collect_view()}
                </div>

                <div class="cta-panel">
                    <h3>"Ready to Transform Your Learning?"</h3>
                    <p>"Be among the first to experience the future of exam preparation."</p>
                    <button class="btn btn-white" on:click=open_notify>
                        "Get Early Access Notification"
                    </button>
                </div>
            </div>
        </Modal>
    }
}
