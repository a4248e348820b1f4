use academy::lead::AppInterestDraft;
use academy::modal::ModalState;
use academy::schema::Platform;
use leptos::prelude::*;

use super::Modal;
use crate::forms::LeadFormHandle;

/// "Be the first to know" launch notification form.
#[component]
pub fn AppNotificationModal(
    modal: RwSignal<ModalState>,
    form: LeadFormHandle<AppInterestDraft>,
) -> impl IntoView {
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.submit();
    };

    view! {
        <Modal state=modal>
            <Show
                when=move || form.is_success()
                fallback=move || view! {
                    <div class="modal-header modal-header-rose">
                        <h3>"🚀 Be the First to Know!"</h3>
                        <p>"Get early access and exclusive launch benefits"</p>
                    </div>

                    <form class="lead-form" on:submit=on_submit>
                        <label>
                            "Full Name " <span class="required">"*"</span>
                            <input
                                type="text"
                                name="full_name"
                                required
                                placeholder="Enter your name"
                                disabled=move || form.is_submitting()
                                prop:value=move || form.field(|d| d.full_name.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.edit(|d| d.full_name = value);
                                }
                            />
                        </label>

                        <label>
                            "Phone Number " <span class="required">"*"</span>
                            <input
                                type="tel"
                                name="phone"
                                required
                                pattern="[0-9]{10}"
                                placeholder="10-digit mobile number"
                                disabled=move || form.is_submitting()
                                prop:value=move || form.field(|d| d.phone.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.edit(|d| d.phone = value);
                                }
                            />
                        </label>

                        <label>
                            "Email " <span class="required">"*"</span>
                            <input
                                type="email"
                                name="email"
                                required
                                placeholder="your.email@example.com"
                                disabled=move || form.is_submitting()
                                prop:value=move || form.field(|d| d.email.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.edit(|d| d.email = value);
                                }
                            />
                        </label>

                        <label>
                            "Preferred Platform " <span class="required">"*"</span>
                            <select
                                name="platform_preference"
                                disabled=move || form.is_submitting()
                                prop:value=move || form.field(|d| d.platform.as_str())
                                on:change=move |ev| {
                                    if let Ok(platform) = event_target_value(&ev).parse::<Platform>() {
                                        form.edit(|d| d.platform = platform);
                                    }
                                }
                            >
                                {Platform::ALL
                                    .into_iter()
                                    .map(|platform| view! {
                                        <option value=platform.as_str()>{platform.label()}</option>
                                    })
                                    .collect_view()}
                            </select>
                        </label>

                        {move || form.invalid().map(|err| view! { <div class="form-error">{err.to_string()}</div> })}
                        {move || form.failure().map(|message| view! { <div class="form-error">{message}</div> })}

                        <button type="submit" class="btn btn-rose btn-block" disabled=move || form.is_submitting()>
                            {move || if form.is_submitting() { "Submitting..." } else { "Notify Me at Launch" }}
                        </button>

                        <p class="form-note">
                            "We'll only use your information to notify you about the app launch. No spam, we promise!"
                        </p>
                    </form>
                }
            >
                <div class="form-success">
                    <div class="form-success-icon">"✓"</div>
                    <h3>"You're on the list!"</h3>
                    <p>
                        "We'll notify you as soon as the app is available. "
                        "Get ready for an amazing learning experience!"
                    </p>
                </div>
            </Show>
        </Modal>
    }
}
