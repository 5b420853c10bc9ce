// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::process::ExitCode;
use std::sync::Arc;

use axiom_node::alerts::TracingNotifier;
use axiom_node::clock::{Clock, SystemClock};
use axiom_node::config::{NodeConfig, StoreKind};
use axiom_node::network::client::JsonRpcLedgerClient;
use axiom_node::orchestrator::AuditOrchestrator;
use axiom_node::schedule::run_schedule;
use axiom_node::server::build_router;
use axiom_node::store::{FileDocumentStore, MemoryStore, SharedStore};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "axiom-node")]
#[command(about = "Hourly core-axiom integrity auditor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the hourly schedule and the HTTP API (default)
    Serve,
    /// Run a single audit tick and exit
    Once,
}

#[tokio::main]
async fn main() -> ExitCode {
    axiom_node::telemetry::init_telemetry();
    let cli = Cli::parse();

    let cfg = match NodeConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Initializing Axiom Node with config: {:?}", redacted(&cfg));

    let store: SharedStore = match cfg.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; audit history is lost on exit");
            Arc::new(MemoryStore::new())
        }
        StoreKind::File => match FileDocumentStore::open(&cfg.store_dir) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("Failed to open store at {:?}: {}", cfg.store_dir, e);
                return ExitCode::FAILURE;
            }
        },
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let orchestrator = Arc::new(AuditOrchestrator::new(
        &cfg,
        store,
        Arc::new(JsonRpcLedgerClient::new()),
        clock.clone(),
        Arc::new(TracingNotifier),
    ));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Once => match orchestrator.run_tick().await {
            Ok(report) => {
                tracing::info!(
                    status = report.audit.status.as_str(),
                    decision = ?report.decision,
                    "Audit complete"
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), "Audit failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Serve => serve(cfg, orchestrator, clock).await,
    }
}

async fn serve(cfg: NodeConfig, orchestrator: Arc<AuditOrchestrator>, clock: Arc<dyn Clock>) -> ExitCode {
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);

    let mut scheduler_stop = stop_rx.clone();
    let scheduler = tokio::spawn(run_schedule(orchestrator.clone(), clock, async move {
        let _ = scheduler_stop.changed().await;
    }));

    let app = build_router(orchestrator, cfg.auth_token.clone());
    let listener = match TcpListener::bind(cfg.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", cfg.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Listening on {}", cfg.bind_addr);

    let mut server_stop = stop_rx;
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = server_stop.changed().await;
    });

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        tracing::info!("Shutdown requested");
        let _ = stop_tx.send(true);
    });

    let result = server.await;
    if let Err(e) = scheduler.await {
        tracing::error!("Scheduler task ended abnormally: {}", e);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn redacted(cfg: &NodeConfig) -> NodeConfig {
    let mut shown = cfg.clone();
    if shown.auth_token.is_some() {
        shown.auth_token = Some("***".to_string());
    }
    shown
}
