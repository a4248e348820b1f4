use academy::schema::SpecialLecture;
use leptos::prelude::*;

/// One expert lecture: portrait, topic, schedule and key takeaways.
#[component]
pub fn LectureCard(lecture: SpecialLecture, on_register: Callback<SpecialLecture>) -> impl IntoView {
    let portrait = match &lecture.image_url {
        Some(url) => view! { <img src=url.clone() alt=lecture.expert_name.clone() /> }.into_any(),
        None => view! { <span class="lecture-portrait-placeholder">"🎓"</span> }.into_any(),
    };

    let schedule = lecture.date_label().map(|date| {
        let time = lecture
            .time_label()
            .map(|time| view! { <span class="lecture-time">{format!(" at {time}")}</span> });
        view! {
            <div class="lecture-date">
                "📅 " <strong>{date}</strong>
                {time}
            </div>
        }
    });

    let credentials = (!lecture.credentials.is_empty()).then(|| {
        view! { <p class="lecture-credentials">{lecture.credentials.clone()}</p> }
    });

    let takeaways = (!lecture.highlights().is_empty()).then(|| {
        let items = lecture
            .highlights()
            .iter()
            .map(|takeaway| view! { <li>{takeaway.clone()}</li> })
            .collect_view();
        view! {
            <div class="lecture-takeaways">
                <h5>"✓ Key Takeaways"</h5>
                <ul>{items}</ul>
            </div>
        }
    });

    let upcoming = lecture.is_upcoming;
    let online = lecture.available_online;
    let duration = format!("⏱ {} minutes", lecture.duration_minutes);
    let expert_name = lecture.expert_name.clone();
    let expert_title = lecture.expert_title.clone();
    let topic = lecture.topic.clone();
    let description = lecture.description.clone();

    view! {
        <article class="lecture-card">
            <div class="lecture-portrait">
                <Show when=move || upcoming>
                    <span class="lecture-badge">"📅 Upcoming"</span>
                </Show>
                {portrait}
                <div class="lecture-expert">
                    <h3>{expert_name}</h3>
                    <p>{expert_title}</p>
                </div>
            </div>

            <div class="lecture-body">
                <h4 class="lecture-topic">{topic}</h4>
                <p class="lecture-description">{description}</p>
                {credentials}
                {schedule}
                <div class="lecture-meta">
                    <span>{duration}</span>
                    <Show when=move || online>
                        <span class="lecture-online">"🌐 Available Online"</span>
                    </Show>
                </div>
                {takeaways}
                <Show when=move || upcoming>
                    <button
                        class="btn btn-amber btn-block"
                        on:click={
                            let lecture = lecture.clone();
                            move |_| on_register.run(lecture.clone())
                        }
                    >
                        "🎓 Register Your Interest"
                    </button>
                </Show>
            </div>
        </article>
    }
}
