use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Token that trips on SIGINT or SIGTERM.
///
/// Every enrichment task selects on a clone of this token, so tripping
/// it turns in-flight completion calls into `cancelled` failures and the
/// run drains instead of hanging until every HTTP call returns.
pub fn create_shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trip = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        trip.cancel();
    });

    token
}

/// Resolve on the first SIGINT or SIGTERM.
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");

        tokio::select! {
            _ = signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
    }
}
