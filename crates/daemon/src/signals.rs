//! Signal handling for the reconciliation daemon.
//!
//! SIGTERM / SIGINT / Ctrl+C request shutdown; SIGUSR1 requests an immediate
//! reconciliation pass outside the regular poll interval.

use tokio::sync::mpsc;
use tracing::{info, warn};

/// Wait for a shutdown signal (SIGTERM, SIGINT, or Ctrl+C).
///
/// Resolves once any termination signal is received.
pub async fn wait_for_shutdown() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("received SIGTERM");
        }
    }
}

/// Forward SIGUSR1 into the scheduler's immediate-pass channel.
///
/// On non-Unix platforms this is a no-op; the poll interval is the only
/// trigger there.
pub fn spawn_usr1_forwarder(tx: mpsc::Sender<()>) {
    #[cfg(unix)]
    {
        tokio::spawn(async move {
            let mut stream =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::user_defined1())
                    .expect("failed to install SIGUSR1 handler");
            while stream.recv().await.is_some() {
                info!("received SIGUSR1, requesting immediate pass");
                if tx.try_send(()).is_err() {
                    warn!("immediate-pass request dropped: one already pending");
                }
            }
        });
    }
    #[cfg(not(unix))]
    drop(tx);
}
