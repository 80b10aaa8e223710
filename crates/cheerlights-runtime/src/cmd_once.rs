//! `cheerlights once` — single fetch, printed as text or JSON.

use std::sync::Arc;

use anyhow::Context;
use cheerlights_core::{Clock, DEFAULT_PERIOD_MS, Document, PollerConfig};
use cheerlights_http::ColorFetcher;
use cheerlights_poller::{Poller, shared_document};

use crate::cli::OnceOpts;
use crate::render::render_document;

/// Entry point for `cheerlights once`.
pub async fn cmd_once<F: ColorFetcher>(
    url: &str,
    opts: &OnceOpts,
    fetcher: Arc<F>,
    use_color: bool,
) -> anyhow::Result<()> {
    let config = PollerConfig::with_period_ms(url, DEFAULT_PERIOD_MS)?;
    let poller = Poller::new(config, fetcher, shared_document(Document::with_default_sinks()));

    println!("{}", once_output(&poller, opts, use_color).await?);
    Ok(())
}

/// Poll once and render the result. Fetch failures become errors.
pub async fn once_output<F: ColorFetcher, C: Clock + 'static>(
    poller: &Poller<F, C>,
    opts: &OnceOpts,
    use_color: bool,
) -> anyhow::Result<String> {
    let url = poller.config().endpoint();
    let update = poller
        .poll()
        .await
        .with_context(|| format!("failed to fetch color from {url}"))?;

    if opts.json {
        Ok(serde_json::to_string_pretty(&update)?)
    } else {
        let document = poller.document();
        let doc = document.lock().await;
        Ok(render_document(&doc, use_color))
    }
}
