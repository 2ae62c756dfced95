//! Quotebook server entry point.
//!
//! Startup order: config, logging, database, bootstrap seeding, listener.
//! Any failure before the listener is bound aborts the process.

#![forbid(unsafe_code)]

use anyhow::{anyhow, Context};
use log::{info, warn};
use quotebook_core::{init_logging, run_bootstrap};
use quotebook_server::{build_router, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("invalid configuration")?;

    init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    let mut conn = config
        .db
        .open()
        .with_context(|| format!("failed to open database {:?}", config.db))?;

    let report = run_bootstrap(&mut conn).context("bootstrap seeding failed")?;
    info!(
        "event=bootstrap module=server status=ok members_created={} stage={:?}",
        report.members_created, report.stage
    );

    let app = build_router(AppState::new(conn, config.app_version));
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok addr={} version={}",
        listener.local_addr()?,
        quotebook_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("server failed")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
                return;
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!("event=signal_register module=server status=error error={err}");
            }
        }
    }

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=signal_wait module=server status=error error={err}");
    }
}
