use std::rc::Rc;

use academy::carousel::Carousel;
use academy::config::{CarouselSettings, LeadSettings};
use academy::featured::{FeaturedLoader, LoadState};
use academy::lead::CallbackDraft;
use academy::modal::ModalState;
use academy::schema::SpecialLecture;
use academy::table::TableClient;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::LectureCard;
use crate::forms::LeadFormHandle;
use crate::modals::CallbackModal;
use crate::timers::BrowserTimers;

const EXPERT_BADGES: [&str; 3] = [
    "Former Government Officials",
    "Industry Experts",
    "Subject Matter Specialists",
];

/// Featured upcoming guest lectures.
///
/// Fetched once on mount. Nothing is rendered when the list comes back empty
/// or the fetch fails.
#[component]
pub fn SpecialLectures(
    client: TableClient,
    settings: CarouselSettings,
    leads: LeadSettings,
) -> impl IntoView {
    let (load, set_load) = signal(LoadState::<SpecialLecture>::Loading);

    let carousel = Carousel::new(0, &settings, Rc::new(BrowserTimers));
    let (position, set_position) = signal(carousel.state());
    carousel.on_change(move |next| {
        set_position.try_set(next);
    });
    let carousel = StoredValue::new_local(carousel);
    on_cleanup(move || {
        carousel.try_with_value(Carousel::dispose);
    });

    let loader = FeaturedLoader::lectures(client.clone());
    spawn_local(async move {
        if let Some(state) = loader.load().await {
            let count = state.items().len();
            if set_load.try_set(state).is_none() {
                carousel.try_with_value(|c| c.set_len(count));
            }
        }
    });

    let modal = RwSignal::new(ModalState::default());
    let form = LeadFormHandle::<CallbackDraft>::new(client, &leads, modal);
    let title = RwSignal::new(String::from("Register for Special Lecture"));

    let register = Callback::new(move |lecture: SpecialLecture| {
        form.set_source_page(lecture.source_page());
        form.edit(|draft| draft.message = lecture.registration_message());
        title.set(format!("Register for {}", lecture.topic));
        modal.update(ModalState::open);
    });

    let strip = move || {
        view! {
            <div class="lectures-strip">
                <Show when=move || position.get().shows_controls()>
                    <button
                        class="strip-arrow strip-arrow-prev"
                        aria-label="Previous lecture"
                        on:click=move |_| carousel.with_value(Carousel::previous)
                    >
                        "‹"
                    </button>
                    <button
                        class="strip-arrow strip-arrow-next"
                        aria-label="Next lecture"
                        on:click=move |_| carousel.with_value(Carousel::next)
                    >
                        "›"
                    </button>
                </Show>

                <div class="strip-viewport">
                    <div
                        class="strip-track"
                        style:transform=move || format!("translateX(-{}%)", position.get().index() * 100)
                    >
                        <For
                            each=move || load.with(|state| state.items().to_vec())
                            key=|lecture| lecture.id.clone()
                            children=move |lecture| {
                                view! {
                                    <div class="strip-slide">
                                        <LectureCard lecture on_register=register />
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>

                <Show when=move || position.get().shows_controls()>
                    <div class="strip-dots">
                        {move || {
                            (0..position.get().len())
                                .map(|index| view! {
                                    <button
                                        class=move || if position.get().index() == index { "dot active" } else { "dot" }
                                        aria-label=format!("Go to lecture {}", index + 1)
                                        on:click=move |_| {
                                            carousel.with_value(|c| c.go_to(index));
                                        }
                                    />
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
        }
    };

    view! {
        <Show when=move || load.with(LoadState::renders_section)>
            <section id="lectures" class="lectures">
                <Show
                    when=move || !load.with(LoadState::is_loading)
                    fallback=|| view! {
                        <div class="lectures-loading">
                            <span class="pulse">"🎓"</span>
                            <p>"Loading special lectures..."</p>
                        </div>
                    }
                >
                    <div class="container">
                        <div class="section-header">
                            <h2 class="section-title">"✨ Special Guest Lectures ✨"</h2>
                            <p class="section-description">
                                "Learn from industry leaders and government experts who share their invaluable insights and experiences"
                            </p>
                            <div class="badge-row">
                                {EXPERT_BADGES
                                    .into_iter()
                                    .map(|badge| view! { <span class="badge">"🎓 " {badge}</span> })
                                    .collect_view()}
                            </div>
                        </div>

                        {strip}

                        <div class="lectures-footer">
                            <p>
                                "🎓 " <strong>"All registered students"</strong>
                                " get exclusive access to these expert sessions at "
                                <strong>"no additional cost"</strong>
                            </p>
                            <span class="badge badge-amber">"✨ Free for all enrolled students"</span>
                        </div>
                    </div>
                </Show>
            </section>
        </Show>
        <CallbackModal modal form title />
    }
}
