//! Hydrowatt CLI and HTTP entry point.
//!
//! Binary name: `hwatt`
//!
//! Parses CLI arguments, sets up tracing, builds the application state and
//! dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing::{info, warn};

use cli::{Cli, Commands};
use hydrowatt_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "hwatt", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await?,

        Commands::Ask { text } => cli::ask::ask(&state, &text.join(" "), cli.json).await?,

        Commands::Context => cli::context::show_context(&state, cli.json).await?,

        Commands::Status => cli::status::status(&state, cli.json).await?,

        Commands::Record { resource } => cli::record::record(&state, resource, cli.json).await?,

        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            let router = http::router::build_router(state);

            info!(%addr, "HTTP server listening");
            if !cli.quiet {
                println!();
                println!(
                    "  {} Hydrowatt API listening on {}",
                    console::style("*").cyan().bold(),
                    console::style(format!("http://{addr}")).underlined()
                );
                println!(
                    "  {}",
                    console::style("POST /api/v1/assistant/stream · GET /api/v1/assistant/context · GET /health").dim()
                );
                println!();
            }

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        // Handled before state init
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
///
/// If a handler cannot be installed, that signal is logged and ignored
/// rather than shutting the server down.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
