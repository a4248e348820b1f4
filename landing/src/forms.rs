//! Reactive wrapper around the core lead form.
//!
//! The form itself is single-threaded (`Rc` inside), so it lives in a local
//! `StoredValue`; what the view reads is mirrored into signals by the form's
//! change observer.

use std::rc::Rc;

use academy::config::LeadSettings;
use academy::lead::{Draft, LeadForm, LeadSnapshot, SubmitError, ValidationError};
use academy::modal::{Dismissal, ModalState};
use academy::table::TableClient;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::timers::BrowserTimers;

/// A lead form bound to the modal that hosts it.
pub struct LeadFormHandle<D: Draft + Send + Sync> {
    form: StoredValue<LeadForm<D>, LocalStorage>,
    snapshot: ReadSignal<LeadSnapshot<D>>,
    invalid: RwSignal<Option<ValidationError>>,
}

impl<D: Draft + Send + Sync> Clone for LeadFormHandle<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Draft + Send + Sync> Copy for LeadFormHandle<D> {}

impl<D: Draft + Send + Sync> LeadFormHandle<D> {
    /// Create the form for the current component.
    ///
    /// The modal is locked while a submission is in flight and closed when
    /// the success message has been shown. The form is disposed with the
    /// component.
    pub fn new(client: TableClient, settings: &LeadSettings, modal: RwSignal<ModalState>) -> Self {
        let form = LeadForm::<D>::new(client, Rc::new(BrowserTimers), settings);
        let (snapshot, set_snapshot) = signal(form.snapshot());

        form.on_change(move |next| {
            set_snapshot.try_set(next.clone());
            modal.try_update(|m| m.set_locked(next.state.is_submitting()));
        });
        form.on_close(move || {
            modal.try_update(|m| {
                m.request_close(Dismissal::Programmatic);
            });
        });

        let form = StoredValue::new_local(form);
        on_cleanup(move || {
            form.try_with_value(LeadForm::dispose);
        });

        Self {
            form,
            snapshot,
            invalid: RwSignal::new(None),
        }
    }

    pub fn set_source_page(&self, page: impl Into<String>) {
        let page = page.into();
        self.form.with_value(|form| form.set_source_page(page));
    }

    /// Read one draft field (tracked).
    pub fn field<T>(&self, read: impl FnOnce(&D) -> T) -> T {
        self.snapshot.with(|snapshot| read(&snapshot.draft))
    }

    pub fn is_submitting(&self) -> bool {
        self.snapshot.with(|snapshot| snapshot.state.is_submitting())
    }

    pub fn is_success(&self) -> bool {
        self.snapshot.with(|snapshot| snapshot.state.is_success())
    }

    /// Backend failure message, if the last attempt failed.
    pub fn failure(&self) -> Option<String> {
        self.snapshot
            .with(|snapshot| snapshot.state.error_message().map(str::to_string))
    }

    /// Validation problem from the last submit attempt.
    pub fn invalid(&self) -> Option<ValidationError> {
        self.invalid.get()
    }

    pub fn edit(&self, change: impl FnOnce(&mut D)) {
        self.invalid.set(None);
        self.form.with_value(|form| form.edit(change));
    }

    pub fn submit(&self) {
        let Some(form) = self.form.try_get_value() else {
            return;
        };
        let invalid = self.invalid;
        invalid.set(None);
        spawn_local(async move {
            // backend failures are already on the form state
            if let Err(SubmitError::Invalid(err)) = form.submit().await {
                invalid.try_set(Some(err));
            }
        });
    }
}
