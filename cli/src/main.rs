//! grow: command-line driver for the verification, task and payout workflows.

use anyhow::Context;
use clap::Parser;
use grow_ledger::{Exchange, LeaderboardEntry};
use grow_session::simulated::simulated_deps;
use grow_session::{init_logging, DashboardView, Session, SessionConfig};
use grow_tasks::{JsonTaskSource, Proof, ReviewOutcome, TaskWorkflow};
use grow_types::{Blob, CaseId, Category, Coins, Platform, TaskId};
use grow_utils::{format_duration, format_playback};
use grow_verification::{FileInput, Point, ReviewDecision};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Verification attempts the demo makes before giving up.
const DEMO_ATTEMPTS: u32 = 3;

#[derive(Parser)]
#[command(name = "grow", about = "Grow verification, task and payout workflows")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "GROW_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GROW_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GROW_LOG_FORMAT")]
    log_format: Option<String>,

    /// Coins per one unit of currency.
    #[arg(long, env = "GROW_EXCHANGE_RATE")]
    exchange_rate: Option<u64>,

    /// Tax deducted at source, in basis points (1500 = 15%).
    #[arg(long, env = "GROW_TDS_BPS")]
    tds_bps: Option<u32>,

    /// Smallest payout in coins.
    #[arg(long, env = "GROW_MIN_WITHDRAWAL")]
    min_withdrawal: Option<u64>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// List the task catalog.
    Tasks {
        /// JSON fixture file with the task definitions.
        #[arg(long, env = "GROW_FIXTURES")]
        fixtures: PathBuf,

        /// Only tasks of this category: follow, watch, post.
        #[arg(long)]
        category: Option<Category>,

        /// Only tasks on this platform.
        #[arg(long)]
        platform: Option<Platform>,
    },

    /// Quote gross, TDS and net for converting coins.
    Exchange {
        #[arg(long)]
        coins: u64,
    },

    /// Print the effective configuration as TOML.
    Config,

    /// Run a scripted session against the simulated providers.
    Demo {
        #[arg(long, env = "GROW_FIXTURES")]
        fixtures: PathBuf,

        /// Identity document to upload; a placeholder is used if omitted.
        #[arg(long)]
        document: Option<PathBuf>,

        #[arg(long, default_value = "demo")]
        user: String,

        /// Skip the simulated latencies.
        #[arg(long)]
        instant: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (file_config, load_error) = match &cli.config {
        Some(path) => match SessionConfig::from_toml_file(&path.to_string_lossy()) {
            Ok(cfg) => (Some(cfg), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };

    let base = file_config.unwrap_or_default();
    let config = SessionConfig {
        exchange_rate: cli.exchange_rate.unwrap_or(base.exchange_rate),
        tds_bps: cli.tds_bps.unwrap_or(base.tds_bps),
        min_withdrawal: cli.min_withdrawal.unwrap_or(base.min_withdrawal),
        log_level: cli.log_level.unwrap_or(base.log_level),
        log_format: cli.log_format.unwrap_or(base.log_format),
        ..base
    };

    init_logging(config.log_format()?, &config.log_level)?;
    match (&cli.config, load_error) {
        (Some(path), Some(e)) => {
            tracing::warn!("Failed to load config file {}: {e}, using defaults", path.display())
        }
        (Some(path), None) => tracing::info!("Loaded config from {}", path.display()),
        _ => {}
    }

    match cli.command {
        Command::Tasks {
            fixtures,
            category,
            platform,
        } => list_tasks(&fixtures, category, platform)?,
        Command::Exchange { coins } => {
            let quote = Exchange::quote(Coins::new(coins), &config.params()?)?;
            println!("coins:  {}", quote.coins);
            println!("gross:  {}", quote.gross);
            println!(
                "tds:    {} ({}.{:02}%)",
                quote.tds,
                config.tds_bps / 100,
                config.tds_bps % 100
            );
            println!("net:    {}", quote.net);
        }
        Command::Config => print!("{}", config.to_toml_string()?),
        Command::Demo {
            fixtures,
            document,
            user,
            instant,
        } => {
            let config = if instant {
                SessionConfig {
                    review_latency_ms: 0,
                    camera_latency_ms: 0,
                    payout_latency_ms: 0,
                    ..config
                }
            } else {
                config
            };
            run_demo(&config, &fixtures, document.as_deref(), &user).await?;
        }
    }

    Ok(())
}

fn list_tasks(
    fixtures: &Path,
    category: Option<Category>,
    platform: Option<Platform>,
) -> anyhow::Result<()> {
    let workflow = TaskWorkflow::new(&JsonTaskSource::new(fixtures))
        .with_context(|| format!("loading tasks from {}", fixtures.display()))?;
    let tasks = workflow.list_tasks(category, platform);
    if tasks.is_empty() {
        println!("no matching tasks");
    }
    for task in tasks {
        let length = task
            .def
            .duration_secs
            .map(|s| format_playback(u64::from(s)))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<7} {:<10} {:>5}  {:<40} {}",
            task.id().raw(),
            task.def.category.as_str(),
            task.def.platform.as_str(),
            task.reward().raw(),
            task.def.title,
            length
        );
    }
    Ok(())
}

async fn run_demo(
    config: &SessionConfig,
    fixtures: &Path,
    document: Option<&Path>,
    user: &str,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let source = JsonTaskSource::new(fixtures);
    let mut session = Session::new(user, CaseId::new(1), config, &source, simulated_deps(config))?;

    // Verification wizard.
    match document {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string());
            session
                .upload_document(&FileInput::new(name, path.to_string_lossy()))
                .await?;
        }
        None => {
            session.attach_document(&Blob::new(
                "image/jpeg",
                b"placeholder identity document".to_vec(),
            ))?;
        }
    }
    session.next_step().await?;
    session.capture_selfie()?;
    session.next_step().await?;
    {
        let pad = session.signature_pad_mut()?;
        pad.begin_stroke(Point { x: 12.0, y: 40.0 });
        pad.line_to(Point { x: 30.0, y: 18.0 });
        pad.line_to(Point { x: 55.0, y: 42.0 });
    }
    session.next_step().await?;
    session.set_details(user, "1990-01-01")?;
    session.next_step().await?;

    let mut decision = session.submit_verification().await?;
    while let ReviewDecision::Rejected { reason } = &decision {
        println!("verification rejected: {reason}");
        if session.verification().case().attempts >= DEMO_ATTEMPTS {
            println!("giving up after {DEMO_ATTEMPTS} attempts");
            session.close();
            return Ok(());
        }
        session.retry_verification()?;
        decision = session.submit_verification().await?;
    }
    println!("verification approved for {user}");

    // Tasks.
    session.open_view(DashboardView::Tasks)?;
    let todo: Vec<(TaskId, Option<u32>, String)> = session
        .list_tasks(None, None)?
        .into_iter()
        .map(|t| (t.id(), t.def.duration_secs, t.def.url.clone()))
        .collect();
    for (id, duration, url) in todo {
        session.open_task_link(id)?;
        if let Some(secs) = duration {
            session.advance_playback(id, secs)?;
        }
        if let Err(e) = session.submit_proof(id, Proof::Link(url)) {
            tracing::warn!(task = %id, "skipping task: {e}");
        }
    }

    // Admin desk approves everything in the queue.
    let pending: Vec<TaskId> = session.pending_reviews().iter().map(|s| s.task_id).collect();
    for id in pending {
        session.resolve_review(id, ReviewOutcome::Approved)?;
    }
    let summary = session.task_summary();
    println!(
        "tasks approved: {}, earned {}, balance {} ({} eligible)",
        summary.approved,
        summary.earned,
        session.ledger().total(),
        session.ledger().eligible()
    );

    // Wallet.
    session.open_view(DashboardView::Wallet)?;
    let eligible = session.ledger().eligible();
    if eligible >= session.params().min_withdrawal {
        let request = session.request_payout(eligible).await?;
        println!(
            "payout requested: {} -> gross {}, tds {}, net {}",
            request.coins, request.quote.gross, request.quote.tds, request.quote.net
        );
        session.open_bank_link()?;
    } else {
        println!(
            "{eligible} is below the minimum withdrawal of {}",
            session.params().min_withdrawal
        );
    }

    session.open_view(DashboardView::Leaderboard)?;
    let board = session.leaderboard(vec![
        LeaderboardEntry {
            name: "ravi".into(),
            coins: Coins::new(4200),
        },
        LeaderboardEntry {
            name: "meera".into(),
            coins: Coins::new(650),
        },
        LeaderboardEntry {
            name: "kabir".into(),
            coins: Coins::new(310),
        },
    ]);
    for entry in board {
        println!("#{:<3} {:<12} {}", entry.rank, entry.name, entry.coins);
    }

    session.close();
    println!(
        "demo finished in {}",
        format_duration(started.elapsed().as_millis() as u64)
    );
    Ok(())
}
