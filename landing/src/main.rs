// The Advanced Learning Academy site, Leptos 0.8 CSR

mod forms;
mod modals;
mod sections;
mod timers;

use std::sync::Arc;

use academy::config::{ENV_BACKEND_KEY, ENV_BACKEND_URL, SiteConfig};
use academy::table::{MemoryTable, RestTable, TableClient};
use leptos::prelude::*;
use sections::*;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    tracing_subscriber::registry()
        .with(level)
        .with(fmt_layer)
        .init();
}

/// Backend settings are baked in at build time.
fn site_config() -> SiteConfig {
    SiteConfig::default().with_overrides(|name| match name {
        ENV_BACKEND_URL => option_env!("ACADEMY_BACKEND_URL").map(str::to_string),
        ENV_BACKEND_KEY => option_env!("ACADEMY_BACKEND_KEY").map(str::to_string),
        _ => None,
    })
}

fn table_client(config: &SiteConfig) -> TableClient {
    match RestTable::new(&config.backend) {
        Ok(rest) => {
            info!("using backend tables");
            Arc::new(rest)
        }
        Err(err) => {
            warn!(error = %err, "backend unavailable, serving preview content");
            Arc::new(MemoryTable::preview())
        }
    }
}

fn main() {
    console_error_panic_hook::set_once();
    init_logging();

    let config = site_config();
    let client = table_client(&config);
    leptos::mount::mount_to_body(move || view! { <App config client /> });
}

#[component]
fn App(config: SiteConfig, client: TableClient) -> impl IntoView {
    let SiteConfig {
        hero,
        lectures,
        leads,
        contact,
        ..
    } = config;

    view! {
        <Nav contact=contact.clone() />
        <main>
            <HeroSlider settings=hero />
            <MobileApp client=client.clone() leads=leads.clone() />
            <SpecialLectures client=client.clone() settings=lectures leads=leads.clone() />
        </main>
        <Footer contact=contact.clone() />
        <ContactBar client leads contact />
    }
}
