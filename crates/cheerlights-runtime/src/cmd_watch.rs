//! `cheerlights watch` — poll on a timer and redraw on every new color.

use std::sync::Arc;

use cheerlights_core::{Document, PollerConfig};
use cheerlights_http::HttpFetcher;
use cheerlights_poller::{Poller, SharedDocument, shared_document};

use crate::cli::WatchOpts;
use crate::render::render_document;

/// Build the poller configuration from CLI options.
pub fn watch_config(url: &str, opts: &WatchOpts) -> anyhow::Result<PollerConfig> {
    Ok(PollerConfig::with_period_ms(url, opts.period_ms)?.with_abort_in_flight(opts.abort_in_flight))
}

/// Entry point for `cheerlights watch` (and the bare `cheerlights` invocation).
pub async fn cmd_watch(
    url: &str,
    opts: &WatchOpts,
    fetcher: HttpFetcher,
    use_color: bool,
) -> anyhow::Result<()> {
    let config = watch_config(url, opts)?;
    let document = shared_document(Document::with_default_sinks());
    let mut poller = Poller::new(config, Arc::new(fetcher), Arc::clone(&document));
    let mut updates = poller.subscribe();

    poller.start();
    draw(&document, use_color).await;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(&document, use_color).await;
            }
            () = &mut shutdown => break,
        }
    }

    poller.stop();
    let stats = poller.stats();
    tracing::info!(
        attempts = stats.attempts,
        successes = stats.successes,
        failures = stats.failures,
        "watch stopped"
    );
    Ok(())
}

async fn draw(document: &SharedDocument, use_color: bool) {
    let body = render_document(&*document.lock().await, use_color);

    if use_color {
        // Clear screen + cursor home
        print!("\x1b[2J\x1b[H");
        println!("{body}");
        println!("\n\x1b[2mcheerlights watch \u{2014} Ctrl-C to quit\x1b[0m");
    } else {
        println!("{body}");
    }
}

/// Resolve on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                tracing::warn!("failed to register SIGTERM handler: {e}");
                ctrl_c.await.ok();
                tracing::info!("received ctrl-c, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        tracing::info!("received ctrl-c, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn watch_config_from_opts() {
        let opts = WatchOpts {
            period_ms: 1500,
            abort_in_flight: true,
        };
        let cfg = watch_config("http://x.test/c", &opts).expect("valid");
        assert_eq!(cfg.endpoint(), "http://x.test/c");
        assert_eq!(cfg.period(), Duration::from_millis(1500));
        assert!(cfg.abort_in_flight);
    }

    #[test]
    fn watch_config_rejects_zero_period() {
        let opts = WatchOpts {
            period_ms: 0,
            abort_in_flight: false,
        };
        let err = watch_config("http://x.test/c", &opts).expect_err("zero period");
        assert!(err.to_string().contains("greater than zero"));
    }
}
