//! # academy
//!
//! Headless core of the Advanced Learning Academy website.
//!
//! Everything interactive on the site is a small state machine that lives
//! here, free of any UI framework, so it can be driven by the Leptos front end,
//! by the `academy` operator CLI, and by plain `cargo test`:
//!
//! - [`carousel`] - indexed rotation with auto-advance, pause-on-hover and
//!   manual navigation (hero slider, lectures strip)
//! - [`lead`] - lead capture forms: draft, validation, one insert per
//!   submission, transient success/error state
//! - [`featured`] - one-shot fetch of featured rows with silent degradation
//! - [`modal`] - overlay open/close with a submit lock
//! - [`table`] - the remote table seam and its REST / in-memory clients
//! - [`schema`] - the typed contract: table names, columns and row types
//! - [`timer`] - injectable intervals/timeouts with cancel-on-drop handles
//! - [`config`] - TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use std::sync::Arc;
//!
//! use academy::config::SiteConfig;
//! use academy::lead::{AppInterestDraft, AppInterestForm};
//! use academy::schema::Platform;
//! use academy::table::{MemoryTable, TableClient};
//! use academy::timer::ManualTimers;
//!
//! # async fn demo() {
//! let config = SiteConfig::default();
//! let client: TableClient = Arc::new(MemoryTable::new());
//! let form = AppInterestForm::new(client, Rc::new(ManualTimers::new()), &config.leads);
//!
//! form.prefill(AppInterestDraft {
//!     full_name: "Asha Verma".into(),
//!     phone: "9876543210".into(),
//!     email: "asha@example.com".into(),
//!     platform: Platform::Android,
//! });
//! form.submit().await.unwrap();
//! assert!(form.state().is_success());
//! # }
//! ```
//!
//! The table client is always passed in explicitly; nothing in this crate
//! reaches for a global handle.

pub mod carousel;
pub mod config;
pub mod featured;
pub mod lead;
pub mod modal;
pub mod schema;
pub mod table;
pub mod timer;

pub use carousel::{Carousel, CarouselState};
pub use config::SiteConfig;
pub use featured::{FeaturedLoader, LoadState};
pub use lead::{LeadForm, SubmissionState};
pub use modal::{Dismissal, ModalState, OverlayCount};
pub use table::{MemoryTable, RemoteTable, RestTable, TableClient, TableError};
pub use timer::{ManualTimers, TimerHandle, Timers};
