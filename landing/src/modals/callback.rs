use academy::lead::CallbackDraft;
use academy::modal::ModalState;
use leptos::prelude::*;

use super::Modal;
use crate::forms::LeadFormHandle;

/// Callback request form, also used to register interest in a lecture.
#[component]
pub fn CallbackModal(
    modal: RwSignal<ModalState>,
    form: LeadFormHandle<CallbackDraft>,
    #[prop(into)] title: Signal<String>,
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
                    <div class="modal-header modal-header-blue">
                        <h3>{move || title.get()}</h3>
                        <p>"Leave your details and our counsellors will call you back."</p>
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
                            "Email"
                            <input
                                type="email"
                                name="email"
                                placeholder="your.email@example.com (optional)"
                                disabled=move || form.is_submitting()
                                prop:value=move || form.field(|d| d.email.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.edit(|d| d.email = value);
                                }
                            />
                        </label>

                        <label>
                            "Message"
                            <textarea
                                name="message"
                                rows="3"
                                placeholder="Which exam are you preparing for?"
                                disabled=move || form.is_submitting()
                                prop:value=move || form.field(|d| d.message.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.edit(|d| d.message = value);
                                }
                            ></textarea>
                        </label>

                        {move || form.invalid().map(|err| view! { <div class="form-error">{err.to_string()}</div> })}
                        {move || form.failure().map(|message| view! { <div class="form-error">{message}</div> })}

                        <button type="submit" class="btn btn-blue btn-block" disabled=move || form.is_submitting()>
                            {move || if form.is_submitting() { "Submitting..." } else { "Request Callback" }}
                        </button>
                    </form>
                }
            >
                <div class="form-success">
                    <div class="form-success-icon">"✓"</div>
                    <h3>"Thank you!"</h3>
                    <p>"Our team will call you back shortly."</p>
                </div>
            </Show>
        </Modal>
    }
}
