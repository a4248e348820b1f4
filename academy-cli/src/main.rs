//! # academy
//!
//! Operator tool for the Advanced Learning Academy site. Talks to the same
//! backend tables through the same core logic as the public pages, so a lead
//! submitted here goes through exactly the validation a visitor sees.
//!
//! ## Usage
//!
//! ```bash
//! # What the lectures strip will show
//! academy lectures
//!
//! # Submit a test lead
//! academy notify --name "Asha Verma" --phone 9876543210 --email asha@example.com
//!
//! # Dry run against the in-process table
//! academy --memory callback --name "Ravi" --phone 9123456780
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use academy::config::SiteConfig;
use academy::featured::FeaturedLoader;
use academy::lead::{AppInterestDraft, CallbackDraft, Draft, LeadForm};
use academy::schema::{Platform, SpecialLecture, TableRow};
use academy::table::{MemoryTable, RestTable, TableClient};
use academy::timer::ManualTimers;

#[derive(Parser, Debug)]
#[command(name = "academy")]
#[command(about = "Featured lectures and lead capture for the academy site")]
#[command(version)]
struct Args {
    /// Configuration file (TOML). Missing file means defaults.
    #[arg(long, default_value = "academy.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Use the in-process table with sample lectures instead of the backend
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print featured upcoming lectures, soonest first
    Lectures {
        /// Print raw rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit an app launch notification request
    Notify {
        #[arg(long)]
        name: String,
        /// Ten digit mobile number
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        /// ios, android or both
        #[arg(long, default_value = "both")]
        platform: Platform,
        /// Recorded as the lead's source page
        #[arg(long, default_value = "cli")]
        source: String,
    },

    /// Submit a callback request
    Callback {
        #[arg(long)]
        name: String,
        /// Ten digit mobile number
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        message: Option<String>,
        /// Recorded as the lead's source page
        #[arg(long, default_value = "cli")]
        source: String,
    },
}

/// The table client plus, for dry runs, the store behind it.
struct Backend {
    client: TableClient,
    memory: Option<Arc<MemoryTable>>,
}

impl Backend {
    fn open(args: &Args, config: &SiteConfig) -> Result<Self> {
        if args.memory {
            let memory = Arc::new(MemoryTable::preview());
            return Ok(Self {
                client: memory.clone(),
                memory: Some(memory),
            });
        }
        let rest = RestTable::new(&config.backend).context(
            "backend is not configured; set [backend] in the config file, \
             ACADEMY_BACKEND_URL/ACADEMY_BACKEND_KEY, or pass --memory",
        )?;
        Ok(Self {
            client: Arc::new(rest),
            memory: None,
        })
    }
}

fn print_lecture(lecture: &SpecialLecture) {
    let when = match (lecture.date_label(), lecture.time_label()) {
        (Some(date), Some(time)) => format!("{date}  {time}"),
        _ => "Date TBA".to_string(),
    };
    println!("{when}  {}", lecture.topic);
    let mode = if lecture.available_online {
        ", online"
    } else {
        ""
    };
    println!(
        "    {}, {} ({} min{mode})",
        lecture.expert_name, lecture.expert_title, lecture.duration_minutes
    );
    for takeaway in lecture.highlights() {
        println!("    - {takeaway}");
    }
}

async fn list_lectures(backend: &Backend, json: bool) -> Result<()> {
    let loader = FeaturedLoader::lectures(backend.client.clone());
    let state = loader.load().await.unwrap_or_else(|| loader.state());
    if let academy::LoadState::Failed(message) = &state {
        anyhow::bail!("could not fetch lectures: {message}");
    }
    let lectures = state.items();
    if json {
        println!("{}", serde_json::to_string_pretty(lectures)?);
        return Ok(());
    }
    if lectures.is_empty() {
        println!("No featured upcoming lectures.");
        return Ok(());
    }
    for lecture in lectures {
        print_lecture(lecture);
    }
    Ok(())
}

async fn submit<D: Draft>(backend: &Backend, config: &SiteConfig, draft: D, source: String) -> Result<()> {
    // a one-shot process never reaches the post-success reset
    let form = LeadForm::<D>::new(
        backend.client.clone(),
        Rc::new(ManualTimers::new()),
        &config.leads,
    );
    let table = <D::Row as TableRow>::TABLE;
    form.set_source_page(source);
    form.prefill(draft);
    form.submit()
        .await
        .with_context(|| format!("could not submit lead to '{table}'"))?;
    info!(table, "lead submitted");
    println!("Submitted to {table}.");

    if let Some(memory) = &backend.memory {
        let rows = memory.rows(table);
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout is for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    let config = SiteConfig::load_from_path(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?
        .with_env_overrides();
    debug!(configured = config.backend.is_configured(), "configuration loaded");

    let backend = Backend::open(&args, &config)?;

    match args.command {
        Command::Lectures { json } => list_lectures(&backend, json).await,
        Command::Notify {
            name,
            phone,
            email,
            platform,
            source,
        } => {
            let draft = AppInterestDraft {
                full_name: name,
                phone,
                email,
                platform,
            };
            submit(&backend, &config, draft, source).await
        }
        Command::Callback {
            name,
            phone,
            email,
            message,
            source,
        } => {
            let draft = CallbackDraft {
                full_name: name,
                phone,
                email: email.unwrap_or_default(),
                message: message.unwrap_or_default(),
            };
            submit(&backend, &config, draft, source).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[academy] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
