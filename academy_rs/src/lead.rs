//! Lead capture forms.
//!
//! A [`LeadForm`] owns a draft, validates it, inserts exactly one row per
//! successful submission and walks the [`SubmissionState`] machine:
//!
//! ```text
//! Idle ──submit──> Submitting ──ok──> Success ──(delay)──> Idle + close
//!                      │  ^
//!                     err │ resubmit
//!                      v  │
//!                     Failed
//! ```
//!
//! Two drafts exist: [`AppInterestDraft`] (launch notification) and
//! [`CallbackDraft`] (callback and lecture registration). No idempotency key is
//! sent, so retrying after an ambiguous timeout can store the lead twice.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::LeadSettings;
use crate::schema::{CallbackRequest, LeadRecord, Platform, TableRow};
use crate::table::{TableClient, TableError, insert_row};
use crate::timer::{SharedTimers, TimerHandle};

/// Message shown when the backend rejects a submission.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit. Please try again.";

/// Form field a validation error points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Phone,
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::FullName => "full name",
            Field::Phone => "phone number",
            Field::Email => "email",
        })
    }
}

/// A draft that must not leave the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("phone number must be exactly 10 digits")]
    PhonePattern,
    #[error("email address is not valid")]
    EmailShape,
}

impl ValidationError {
    /// The field to highlight.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Missing(field) => *field,
            ValidationError::PhonePattern => Field::Phone,
            ValidationError::EmailShape => Field::Email,
        }
    }
}

/// Why a submission did not complete.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("this lead was already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("submission failed: {0}")]
    Table(#[from] TableError),
}

/// Which screen the form shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionState::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Exactly ten ASCII digits, the `[0-9]{10}` input pattern.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// `local@domain` with no whitespace, what an `type="email"` input accepts.
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn required(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

/// Editable form contents bound to one table.
pub trait Draft: Clone + Default + 'static {
    type Row: TableRow;

    fn validate(&self) -> Result<(), ValidationError>;

    /// The row to insert, tagged with where it was captured.
    fn to_row(&self, source_page: &str) -> Self::Row;
}

/// "Notify me at launch" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppInterestDraft {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub platform: Platform,
}

impl Draft for AppInterestDraft {
    type Row = LeadRecord;

    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.full_name, Field::FullName)?;
        required(&self.phone, Field::Phone)?;
        if !is_valid_phone(&self.phone) {
            return Err(ValidationError::PhonePattern);
        }
        required(&self.email, Field::Email)?;
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::EmailShape);
        }
        Ok(())
    }

    fn to_row(&self, source_page: &str) -> LeadRecord {
        LeadRecord {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            platform_preference: self.platform,
            source_page: source_page.to_string(),
        }
    }
}

/// "Request a callback" form. Email and message are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackDraft {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl Draft for CallbackDraft {
    type Row = CallbackRequest;

    fn validate(&self) -> Result<(), ValidationError> {
        required(&self.full_name, Field::FullName)?;
        required(&self.phone, Field::Phone)?;
        if !is_valid_phone(&self.phone) {
            return Err(ValidationError::PhonePattern);
        }
        let email = self.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            return Err(ValidationError::EmailShape);
        }
        Ok(())
    }

    fn to_row(&self, source_page: &str) -> CallbackRequest {
        let optional = |value: &str| Some(value.trim().to_string()).filter(|v| !v.is_empty());
        CallbackRequest {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: optional(&self.email),
            message: optional(&self.message),
            source_page: source_page.to_string(),
        }
    }
}

/// What the view renders: the draft plus the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSnapshot<D> {
    pub draft: D,
    pub state: SubmissionState,
}

type Observer<D> = Rc<dyn Fn(&LeadSnapshot<D>)>;

struct FormInner<D: Draft> {
    client: TableClient,
    timers: SharedTimers,
    success_delay: Duration,
    source_page: RefCell<String>,
    draft: RefCell<D>,
    state: RefCell<SubmissionState>,
    reset_timer: RefCell<Option<TimerHandle>>,
    observer: RefCell<Option<Observer<D>>>,
    on_close: RefCell<Option<Rc<dyn Fn()>>>,
    disposed: Cell<bool>,
}

impl<D: Draft> FormInner<D> {
    fn snapshot(&self) -> LeadSnapshot<D> {
        LeadSnapshot {
            draft: self.draft.borrow().clone(),
            state: self.state.borrow().clone(),
        }
    }

    fn notify(&self) {
        if self.disposed.get() {
            return;
        }
        let snapshot = self.snapshot();
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&snapshot);
        }
    }

    fn set_state(&self, state: SubmissionState) {
        *self.state.borrow_mut() = state;
        self.notify();
    }

    /// End of the success display: clear the draft, go idle, close the host.
    fn finish(&self) {
        if self.disposed.get() {
            return;
        }
        *self.draft.borrow_mut() = D::default();
        self.reset_timer.borrow_mut().take();
        self.set_state(SubmissionState::Idle);
        let on_close = self.on_close.borrow().clone();
        if let Some(on_close) = on_close {
            on_close();
        }
    }
}

/// A lead capture form bound to a table client.
///
/// Cloning yields another handle to the same form, so an async submission
/// can hold one while the view keeps another.
pub struct LeadForm<D: Draft> {
    inner: Rc<FormInner<D>>,
}

impl<D: Draft> Clone for LeadForm<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Launch-notification form.
pub type AppInterestForm = LeadForm<AppInterestDraft>;
/// Callback / lecture registration form.
pub type CallbackForm = LeadForm<CallbackDraft>;

impl<D: Draft> LeadForm<D> {
    pub fn new(client: TableClient, timers: SharedTimers, settings: &LeadSettings) -> Self {
        Self {
            inner: Rc::new(FormInner {
                client,
                timers,
                success_delay: settings.success_display(),
                source_page: RefCell::new(settings.default_source_page.clone()),
                draft: RefCell::new(D::default()),
                state: RefCell::new(SubmissionState::Idle),
                reset_timer: RefCell::new(None),
                observer: RefCell::new(None),
                on_close: RefCell::new(None),
                disposed: Cell::new(false),
            }),
        }
    }

    /// Record submissions as coming from `page` instead of the configured default.
    pub fn set_source_page(&self, page: impl Into<String>) {
        *self.inner.source_page.borrow_mut() = page.into();
    }

    pub fn source_page(&self) -> String {
        self.inner.source_page.borrow().clone()
    }

    /// Register the observer called after every draft or state change.
    pub fn on_change(&self, observer: impl Fn(&LeadSnapshot<D>) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Rc::new(observer));
    }

    /// Register what runs when the success display ends (usually: close the modal).
    pub fn on_close(&self, on_close: impl Fn() + 'static) {
        *self.inner.on_close.borrow_mut() = Some(Rc::new(on_close));
    }

    pub fn draft(&self) -> D {
        self.inner.draft.borrow().clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.state.borrow().clone()
    }

    pub fn snapshot(&self) -> LeadSnapshot<D> {
        self.inner.snapshot()
    }

    /// Change the draft. Ignored while a submission is in flight (inputs are disabled).
    pub fn edit(&self, change: impl FnOnce(&mut D)) {
        if self.inner.state.borrow().is_submitting() {
            return;
        }
        change(&mut self.inner.draft.borrow_mut());
        self.inner.notify();
    }

    /// Replace the draft wholesale, e.g. to prefill a lecture registration.
    pub fn prefill(&self, draft: D) {
        self.edit(move |current| *current = draft);
    }

    /// Validate and send the draft.
    ///
    /// Only `Idle` and `Failed` forms submit. Invalid drafts, concurrent
    /// calls and calls during the success display return before any network
    /// traffic and leave the state untouched. A backend failure moves the form
    /// to [`SubmissionState::Failed`] and keeps the draft for another attempt.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let row = {
            match &*self.inner.state.borrow() {
                SubmissionState::Idle | SubmissionState::Failed(_) => {}
                SubmissionState::Submitting => {
                    debug!("submission already in flight, ignoring");
                    return Err(SubmitError::InFlight);
                }
                SubmissionState::Success => {
                    debug!("lead already submitted, waiting for reset");
                    return Err(SubmitError::AlreadySubmitted);
                }
            }
            let draft = self.inner.draft.borrow();
            draft.validate()?;
            draft.to_row(&self.inner.source_page.borrow())
        };
        self.inner.set_state(SubmissionState::Submitting);

        let outcome = insert_row(self.inner.client.as_ref(), &row).await;

        if self.inner.disposed.get() {
            // the view is gone; nothing left to update
            return outcome.map_err(SubmitError::from);
        }

        match outcome {
            Ok(()) => {
                info!(table = <D::Row as TableRow>::TABLE, source_page = %self.source_page(), "lead captured");
                self.inner.set_state(SubmissionState::Success);
                self.schedule_reset();
                Ok(())
            }
            Err(err) => {
                error!(table = <D::Row as TableRow>::TABLE, error = %err, "error submitting lead");
                self.inner
                    .set_state(SubmissionState::Failed(SUBMIT_FAILED_MESSAGE.to_string()));
                Err(SubmitError::Table(err))
            }
        }
    }

    fn schedule_reset(&self) {
        let weak: Weak<FormInner<D>> = Rc::downgrade(&self.inner);
        let handle = self.inner.timers.timeout(
            self.inner.success_delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.finish();
                }
            }),
        );
        let previous = self.inner.reset_timer.borrow_mut().replace(handle);
        drop(previous);
    }

    /// Whether the post-success reset is still pending.
    pub fn reset_pending(&self) -> bool {
        self.inner.reset_timer.borrow().is_some()
    }

    /// Cancel pending timers and stop notifying. Late results are discarded.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        let handle = self.inner.reset_timer.borrow_mut().take();
        drop(handle);
        let observer = self.inner.observer.borrow_mut().take();
        drop(observer);
        let on_close = self.inner.on_close.borrow_mut().take();
        drop(on_close);
    }
}

impl<D: Draft + fmt::Debug> fmt::Debug for LeadForm<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadForm")
            .field("draft", &*self.inner.draft.borrow())
            .field("state", &*self.inner.state.borrow())
            .field("source_page", &*self.inner.source_page.borrow())
            .finish()
    }
}
