//! Graceful shutdown on SIGINT/SIGTERM

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
#[error("failed to install {signal} handler: {source}")]
pub(crate) struct ShutdownSignalError {
    signal: Signal,

    #[source]
    source: io::Error,
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    Interrupt,

    #[cfg(unix)]
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("interrupt"),
            #[cfg(unix)]
            Self::Terminate => f.write_str("terminate"),
        }
    }
}

async fn interrupt() -> Result<Signal, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(|source| ShutdownSignalError {
            signal: Signal::Interrupt,
            source,
        })?;

    Ok(Signal::Interrupt)
}

#[cfg(unix)]
async fn terminate() -> Result<Signal, ShutdownSignalError> {
    use signal::unix::{SignalKind, signal};

    signal(SignalKind::terminate())
        .map_err(|source| ShutdownSignalError {
            signal: Signal::Terminate,
            source,
        })?
        .recv()
        .await;

    Ok(Signal::Terminate)
}

#[cfg(not(unix))]
async fn terminate() -> Result<Signal, ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for a shutdown signal, then let in-flight requests finish within
/// `grace` before the server stops.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        received = interrupt() => received?,
        received = terminate() => received?,
    };

    info!(
        signal = %received,
        grace_seconds = grace.as_secs(),
        "shutdown signal received, draining requests"
    );

    handle.stop_graceful(Some(grace));

    Ok(())
}
