//! Poller: a restartable repeating timer that fetches one color per tick
//! and writes it into the shared document.
//!
//! Each tick spawns its poll as a separate task, so a fetch slower than the
//! period overlaps with the next one. Results are applied in resolution
//! order: whichever fetch resolves last wins the document. `stop()` cancels
//! the schedule only; fetches already in flight still apply unless the
//! config asks for them to be aborted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use cheerlights_core::{Clock, ColorUpdate, Document, PollerConfig, SystemClock};
use cheerlights_http::{ColorFetcher, FetchError};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::stats::{Counters, PollStats};

/// Externally owned document the poller writes into.
pub type SharedDocument = Arc<tokio::sync::Mutex<Document>>;

/// Wrap a document for sharing with a poller.
pub fn shared_document(doc: Document) -> SharedDocument {
    Arc::new(tokio::sync::Mutex::new(doc))
}

/// Lifecycle state. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Stopped,
    Polling,
}

// ─── Shared poll context ────────────────────────────────────────────

/// Everything a poll task needs, shared between the poller, its timer
/// task, and every spawned poll.
struct PollContext<F, C> {
    fetcher: Arc<F>,
    clock: Arc<C>,
    document: SharedDocument,
    updates: watch::Sender<Option<ColorUpdate>>,
    counters: Counters,
    in_flight: Mutex<Vec<AbortHandle>>,
}

impl<F: ColorFetcher, C: Clock + 'static> PollContext<F, C> {
    async fn poll(&self, url: &str) -> Result<ColorUpdate, FetchError> {
        self.counters.attempt();

        let color = match self.fetcher.fetch(url).await {
            Ok(color) => color,
            Err(e) => {
                self.counters.failure();
                return Err(e);
            }
        };

        let update = ColorUpdate::new(color, self.clock.now());
        let written = self.document.lock().await.apply(&update);
        self.counters.success();
        self.updates.send_replace(Some(update.clone()));

        tracing::info!(color = %update.color, sinks = written, "color updated");
        Ok(update)
    }

    /// Run one poll as its own task. Failures are logged and skipped.
    fn spawn_poll(self: &Arc<Self>, url: Arc<str>) {
        let ctx = Arc::clone(self);
        let task = tokio::spawn(async move {
            if let Err(e) = ctx.poll(&url).await {
                tracing::warn!("poll of {url} failed: {e}");
            }
        });

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(task.abort_handle());
    }

    fn abort_in_flight(&self) -> usize {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let pending: Vec<AbortHandle> = in_flight.drain(..).filter(|h| !h.is_finished()).collect();
        for handle in &pending {
            handle.abort();
        }
        pending.len()
    }
}

// ─── TimerHandle ────────────────────────────────────────────────────

/// The single repeating schedule of a running poller.
///
/// Cancelling (or dropping) the handle guarantees no further tick spawns a
/// poll, even if the timer task is mid-tick on another worker.
struct TimerHandle {
    task: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_schedule<F: ColorFetcher, C: Clock + 'static>(
    ctx: Arc<PollContext<F, C>>,
    url: Arc<str>,
    period: Duration,
    cancelled: Arc<AtomicBool>,
) {
    // First scheduled tick lands one full period after start.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if cancelled.load(Ordering::Acquire) {
            break;
        }
        tracing::debug!("poll tick");
        ctx.spawn_poll(Arc::clone(&url));
    }
}

// ─── Poller ─────────────────────────────────────────────────────────

/// Periodic color poller. At most one timer is active per instance.
///
/// `start`, `stop` and dropping a running poller must happen inside a Tokio
/// runtime.
pub struct Poller<F: ColorFetcher, C: Clock + 'static = SystemClock> {
    config: PollerConfig,
    ctx: Arc<PollContext<F, C>>,
    timer: Option<TimerHandle>,
}

impl<F: ColorFetcher> Poller<F, SystemClock> {
    pub fn new(config: PollerConfig, fetcher: Arc<F>, document: SharedDocument) -> Self {
        Self::with_clock(config, fetcher, Arc::new(SystemClock), document)
    }
}

impl<F: ColorFetcher, C: Clock + 'static> Poller<F, C> {
    pub fn with_clock(
        config: PollerConfig,
        fetcher: Arc<F>,
        clock: Arc<C>,
        document: SharedDocument,
    ) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            config,
            ctx: Arc::new(PollContext {
                fetcher,
                clock,
                document,
                updates,
                counters: Counters::default(),
                in_flight: Mutex::new(Vec::new()),
            }),
            timer: None,
        }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Reconfigure the poller. Changes take effect on the next `start()`.
    pub fn config_mut(&mut self) -> &mut PollerConfig {
        &mut self.config
    }

    pub fn document(&self) -> SharedDocument {
        Arc::clone(&self.ctx.document)
    }

    /// Observe applied updates. Holds `None` until the first success.
    pub fn subscribe(&self) -> watch::Receiver<Option<ColorUpdate>> {
        self.ctx.updates.subscribe()
    }

    pub fn stats(&self) -> PollStats {
        self.ctx.counters.snapshot()
    }

    pub fn state(&self) -> PollerState {
        if self.timer.is_some() {
            PollerState::Polling
        } else {
            PollerState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == PollerState::Polling
    }

    /// Start (or restart) polling.
    ///
    /// Clears any existing timer first, schedules a tick every period, and
    /// fires one poll immediately so the first update is not delayed.
    pub fn start(&mut self) {
        self.stop();

        let url: Arc<str> = Arc::from(self.config.endpoint());
        let period = self.config.period();
        let cancelled = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(run_schedule(
            Arc::clone(&self.ctx),
            Arc::clone(&url),
            period,
            Arc::clone(&cancelled),
        ));
        self.timer = Some(TimerHandle { task, cancelled });

        tracing::info!("polling {url} every {}ms", period.as_millis());
        self.ctx.spawn_poll(url);
    }

    /// Cancel the schedule. No-op when already stopped.
    ///
    /// In-flight fetches keep running and still apply their result, unless
    /// `abort_in_flight` is set in the config.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            tracing::info!("polling stopped");
        }

        if self.config.abort_in_flight {
            let aborted = self.ctx.abort_in_flight();
            if aborted > 0 {
                tracing::debug!("aborted {aborted} in-flight polls");
            }
        }
    }

    /// One fetch of the configured endpoint, applied inline.
    ///
    /// Unlike scheduled ticks, the result is returned to the caller.
    pub async fn poll(&self) -> Result<ColorUpdate, FetchError> {
        self.ctx.poll(self.config.endpoint()).await
    }
}

impl<F: ColorFetcher, C: Clock + 'static> Drop for Poller<F, C> {
    fn drop(&mut self) {
        self.stop();
    }
}
