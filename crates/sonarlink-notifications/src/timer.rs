//! Recurring scheduled task.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Runs one callback every `period` on a background task.
///
/// The first run happens one full period after [`start`](Self::start). Each
/// run is awaited before the next tick is taken, and ticks missed while a run
/// was still going are skipped rather than replayed, so runs never overlap.
///
/// Dropping the timer stops it.
#[derive(Debug)]
pub struct PollTimer {
    period: Duration,
    running: Option<(CancellationToken, JoinHandle<()>)>,
}

impl PollTimer {
    /// Disarmed timer firing every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: None,
        }
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a callback is registered and ticking.
    pub fn is_armed(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|(_, task)| !task.is_finished())
    }

    /// Arm the timer with `callback`. A no-op when already armed.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if the period is zero.
    pub fn start<F, Fut>(&mut self, mut callback: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_armed() {
            return;
        }

        let mut ticks = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let token = CancellationToken::new();
        let stopped = token.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = stopped.cancelled() => break,
                    _ = ticks.tick() => {}
                }

                trace!("Poll timer tick");
                tokio::select! {
                    biased;
                    () = stopped.cancelled() => break,
                    () = callback() => {}
                }
            }
        });

        self.running = Some((token, task));
    }

    /// Disarm the timer. A no-op when not armed.
    pub fn stop(&mut self) {
        if let Some((token, task)) = self.running.take() {
            token.cancel();
            task.abort();
        }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
