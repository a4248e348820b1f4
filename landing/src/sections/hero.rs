use std::rc::Rc;

use academy::carousel::Carousel;
use academy::config::CarouselSettings;
use leptos::prelude::*;

use crate::timers::BrowserTimers;

struct Slide {
    headline: &'static str,
    subheadline: &'static str,
    image: &'static str,
    cta_text: &'static str,
    cta_link: &'static str,
}

static SLIDES: [Slide; 3] = [
    Slide {
        headline: "Become a Government Job Leader",
        subheadline: "Master RRB, SSC, and Banking Exams with Expert-Led Programs",
        image: "assets/hero-leader.jpg",
        cta_text: "Explore Programs",
        cta_link: "/courses",
    },
    Slide {
        headline: "Transform Your Career with SSC Excellence",
        subheadline: "All our programs include personalized mentoring and comprehensive study material",
        image: "assets/hero-success-story.jpg",
        cta_text: "Explore Programs",
        cta_link: "/courses",
    },
    Slide {
        headline: "Railway Exam Success Starts Here",
        subheadline: "Join hundreds of successful candidates who achieved their dreams with us",
        image: "assets/hero-railway.jpg",
        cta_text: "Explore Programs",
        cta_link: "/courses",
    },
];

#[component]
pub fn HeroSlider(settings: CarouselSettings) -> impl IntoView {
    let carousel = Carousel::new(SLIDES.len(), &settings, Rc::new(BrowserTimers));
    let (state, set_state) = signal(carousel.state());
    carousel.on_change(move |next| {
        set_state.try_set(next);
    });

    let carousel = StoredValue::new_local(carousel);
    on_cleanup(move || {
        carousel.try_with_value(Carousel::dispose);
    });

    let slide = move || {
        SLIDES.get(state.get().index()).map(|slide| {
            view! {
                <div class="hero-slide">
                    <div class="hero-image">
                        <img src=slide.image alt="Hero" />
                    </div>
                    <div class="hero-content">
                        <h1 class="hero-title">{slide.headline}</h1>
                        <p class="hero-description">{slide.subheadline}</p>
                        <a href=slide.cta_link class="btn btn-primary">{slide.cta_text}</a>
                    </div>
                </div>
            }
        })
    };

    view! {
        <section
            class="hero"
            on:mouseenter=move |_| carousel.with_value(Carousel::pause)
            on:mouseleave=move |_| carousel.with_value(Carousel::resume)
        >
            {slide}
            <Show when=move || state.get().shows_controls()>
                <button
                    class="hero-arrow hero-arrow-prev"
                    aria-label="Previous slide"
                    on:click=move |_| carousel.with_value(Carousel::previous)
                >
                    "‹"
                </button>
                <button
                    class="hero-arrow hero-arrow-next"
                    aria-label="Next slide"
                    on:click=move |_| carousel.with_value(Carousel::next)
                >
                    "›"
                </button>
                <div class="hero-dots">
                    {(0..SLIDES.len())
                        .map(|index| view! {
                            <button
                                class=move || if state.get().index() == index { "dot active" } else { "dot" }
                                aria-label=format!("Go to slide {}", index + 1)
                                on:click=move |_| {
                                    carousel.with_value(|c| c.go_to(index));
                                }
                            />
                        })
                        .collect_view()}
                </div>
            </Show>
        </section>
    }
}
