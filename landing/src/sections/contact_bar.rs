use academy::config::{ContactSettings, LeadSettings};
use academy::lead::CallbackDraft;
use academy::modal::ModalState;
use academy::table::TableClient;
use leptos::prelude::*;

use crate::forms::LeadFormHandle;
use crate::modals::CallbackModal;

/// Bar pinned to the bottom of every page: callback request and a call link.
#[component]
pub fn ContactBar(client: TableClient, leads: LeadSettings, contact: ContactSettings) -> impl IntoView {
    let modal = RwSignal::new(ModalState::default());
    let form = LeadFormHandle::<CallbackDraft>::new(client, &leads, modal);
    form.set_source_page("contact-bar");

    view! {
        <div class="contact-bar">
            <div class="contact-bar-inner">
                <button class="btn btn-blue" on:click=move |_| modal.update(ModalState::open)>
                    "📞 Request a Callback"
                </button>
                <a href=contact.tel_href() class="btn btn-white">
                    <span class="hide-sm">"Call us on "</span>
                    <strong>{contact.phone.clone()}</strong>
                </a>
            </div>
        </div>
        <CallbackModal modal form title="Request a Callback" />
    }
}
