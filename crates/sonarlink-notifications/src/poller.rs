//! Notification poller.
//!
//! `NotificationPoller` owns the watermark and drives the fetch cycle: once
//! on [`start`](NotificationPoller::start), then on every tick of its
//! [`PollTimer`]. Each cycle asks the [`NotificationSource`] for events newer
//! than the watermark and applies the outcome to the [`NotificationModel`].

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use parking_lot::Mutex;
use sonarlink_client::{NotificationOutcome, SessionError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::PollerConfig;
use crate::error::{PollerError, Result};
use crate::model::NotificationModel;
use crate::source::{NotificationSource, ProjectBinding};
use crate::timer::PollTimer;
use crate::watermark::{NotificationData, Watermark};

/// Lifecycle state of a [`NotificationPoller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollerState {
    /// Not polling.
    Stopped,
    /// Timer armed, cycles running.
    Running,
}

#[derive(Debug)]
enum Run {
    Stopped,
    /// Token shared by every cycle of this run.
    Running(CancellationToken),
}

#[derive(Debug)]
struct PollerInner {
    source: Arc<dyn NotificationSource>,
    binding: Arc<dyn ProjectBinding>,
    model: Arc<dyn NotificationModel>,
    config: PollerConfig,
    run: Mutex<Run>,
    watermark: Mutex<Watermark>,
    timer: Mutex<PollTimer>,
}

/// Timer-driven notification poller.
///
/// Created stopped. Dropping the poller stops it.
///
/// # Examples
///
/// ```rust,ignore
/// let poller = NotificationPoller::new(
///     Arc::new(session.clone()),
///     Arc::new(BoundProject::bound("my-app")),
///     Arc::new(NotificationIndicator::new()),
///     PollerConfig::default(),
/// )?;
///
/// poller.start(load_persisted()).await?;
/// // ...
/// save_persisted(poller.current_watermark());
/// poller.stop();
/// ```
#[derive(Debug)]
pub struct NotificationPoller {
    inner: Arc<PollerInner>,
}

impl NotificationPoller {
    /// Create a stopped poller.
    ///
    /// # Errors
    ///
    /// Returns [`PollerError::InvalidConfig`] if `config` does not validate.
    pub fn new(
        source: Arc<dyn NotificationSource>,
        binding: Arc<dyn ProjectBinding>,
        model: Arc<dyn NotificationModel>,
        config: PollerConfig,
    ) -> Result<Self> {
        config.validate()?;

        let watermark = Watermark::initial(None, now(), config.lookback());
        let timer = PollTimer::new(config.poll_interval());

        Ok(Self {
            inner: Arc::new(PollerInner {
                source,
                binding,
                model,
                config,
                run: Mutex::new(Run::Stopped),
                watermark: Mutex::new(watermark),
                timer: Mutex::new(timer),
            }),
        })
    }

    /// Poller configuration.
    pub fn config(&self) -> &PollerConfig {
        &self.inner.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PollerState {
        match *self.inner.run.lock() {
            Run::Stopped => PollerState::Stopped,
            Run::Running(_) => PollerState::Running,
        }
    }

    /// Current watermark.
    pub fn watermark(&self) -> DateTime<FixedOffset> {
        self.inner.watermark.lock().get()
    }

    /// Record for the host to persist.
    pub fn current_watermark(&self) -> NotificationData {
        NotificationData {
            is_enabled: self.inner.model.is_enabled(),
            last_notification_date: self.watermark(),
        }
    }

    /// Start polling.
    ///
    /// Restores the enabled flag (default `true`), sets the watermark to the
    /// persisted date clamped to the lookback window, runs one cycle and then
    /// arms the timer. If that first cycle finds the server has no
    /// notification support, the poller is already stopped on return and the
    /// timer is never armed.
    ///
    /// # Errors
    ///
    /// Returns [`PollerError::AlreadyRunning`] if the poller is running.
    pub async fn start(&self, persisted: Option<NotificationData>) -> Result<()> {
        let token = {
            let mut run = self.inner.run.lock();
            if matches!(*run, Run::Running(_)) {
                return Err(PollerError::AlreadyRunning);
            }
            let token = CancellationToken::new();
            *run = Run::Running(token.clone());
            token
        };

        let (enabled, last_date) = match persisted {
            Some(data) => (data.is_enabled, Some(data.last_notification_date)),
            None => (true, None),
        };
        self.inner.model.set_enabled(enabled);

        let watermark = Watermark::initial(last_date, now(), self.inner.config.lookback());
        *self.inner.watermark.lock() = watermark;
        info!(
            watermark = %watermark.get(),
            enabled,
            "Starting notification poller"
        );

        self.inner.cycle(&token).await;

        let mut timer = self.inner.timer.lock();
        if token.is_cancelled() {
            return Ok(());
        }
        let inner = Arc::clone(&self.inner);
        timer.start(move || {
            let inner = Arc::clone(&inner);
            let token = token.clone();
            async move { inner.cycle(&token).await }
        });

        Ok(())
    }

    /// Stop polling.
    ///
    /// Cancels any in-flight fetch, disarms the timer and hides the
    /// indicator. A no-op when already stopped.
    pub fn stop(&self) {
        self.inner.stop();
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

impl PollerInner {
    async fn cycle(&self, cancel: &CancellationToken) {
        if cancel.is_cancelled() {
            return;
        }
        if !self.source.is_connected() {
            debug!("Session not connected, skipping notification cycle");
            return;
        }
        let Some(project_key) = self.binding.project_key() else {
            debug!("No project bound, skipping notification cycle");
            return;
        };

        let since = self.watermark.lock().get();
        let result = self
            .source
            .notification_events(&project_key, since, cancel)
            .await;
        if cancel.is_cancelled() {
            return;
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(SessionError::OperationCancelled) => {
                debug!(%project_key, "Notification fetch cancelled");
                return;
            }
            Err(error) => {
                warn!(
                    %project_key,
                    %error,
                    "Notification fetch failed, retrying on next tick"
                );
                return;
            }
        };

        let latest = outcome.latest_date();
        let NotificationOutcome::Events(events) = outcome else {
            warn!(
                %project_key,
                "Server does not support notifications, stopping poller"
            );
            self.stop();
            return;
        };

        self.model.set_visible(true);
        if let Some(latest) = latest {
            let advanced = self.watermark.lock().advance(latest);
            if advanced {
                debug!(%project_key, watermark = %latest, "Advanced notification watermark");
            }
        }
        debug!(%project_key, count = events.len(), "Publishing notifications");
        self.model.publish(events);
    }

    fn stop(&self) {
        let previous = std::mem::replace(&mut *self.run.lock(), Run::Stopped);
        let Run::Running(token) = previous else {
            return;
        };

        token.cancel();
        self.timer.lock().stop();
        self.model.set_visible(false);
        info!("Notification poller stopped");
    }
}

fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationIndicator;
    use crate::source::BoundProject;
    use async_trait::async_trait;
    use chrono::TimeDelta;
    use sonarlink_client::Notification;
    use sonarlink_transport::StatusCode;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};

    type Answer = std::result::Result<NotificationOutcome, SessionError>;

    #[derive(Debug)]
    struct FakeSource {
        connected: AtomicBool,
        answers: Mutex<VecDeque<Answer>>,
        queried: Mutex<Vec<(String, DateTime<FixedOffset>)>>,
    }

    impl FakeSource {
        fn new(answers: Vec<Answer>) -> Arc<Self> {
            Arc::new(Self {
                connected: AtomicBool::new(true),
                answers: Mutex::new(answers.into()),
                queried: Mutex::new(Vec::new()),
            })
        }

        fn queried(&self) -> Vec<(String, DateTime<FixedOffset>)> {
            self.queried.lock().clone()
        }
    }

    #[async_trait]
    impl NotificationSource for FakeSource {
        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }

        async fn notification_events(
            &self,
            project_key: &str,
            since: DateTime<FixedOffset>,
            _cancel: &CancellationToken,
        ) -> Answer {
            self.queried.lock().push((project_key.to_string(), since));
            self.answers
                .lock()
                .pop_front()
                .unwrap_or(Ok(NotificationOutcome::Events(Vec::new())))
        }
    }

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    fn event(date: DateTime<FixedOffset>) -> Notification {
        Notification {
            category: "QUALITY_GATE".into(),
            link: "https://quality.example.com/dashboard?id=app".into(),
            message: "Quality gate is Red (was Green)".into(),
            date,
            project: "app".into(),
        }
    }

    fn poller(
        source: Arc<FakeSource>,
        binding: Arc<BoundProject>,
    ) -> (NotificationPoller, Arc<NotificationIndicator>) {
        let model = Arc::new(NotificationIndicator::new());
        let poller = NotificationPoller::new(
            source,
            binding,
            model.clone(),
            PollerConfig::default(),
        )
        .unwrap();
        (poller, model)
    }

    #[tokio::test]
    async fn test_not_supported_stops_and_hides_indicator() {
        let source = FakeSource::new(vec![Ok(NotificationOutcome::NotSupported)]);
        let (poller, model) = poller(source.clone(), Arc::new(BoundProject::bound("app")));
        model.set_visible(true);

        poller.start(None).await.unwrap();

        assert_eq!(poller.state(), PollerState::Stopped);
        assert!(!model.is_visible());
        assert!(!poller.inner.timer.lock().is_armed());
        assert_eq!(source.queried().len(), 1);
    }

    #[tokio::test]
    async fn test_events_advance_watermark_and_publish() {
        let recent = now() - TimeDelta::hours(1);
        let newest = now() - TimeDelta::minutes(5);
        let source = FakeSource::new(vec![Ok(NotificationOutcome::Events(vec![
            event(recent),
            event(newest),
        ]))]);
        let (poller, model) = poller(source.clone(), Arc::new(BoundProject::bound("app")));

        poller.start(None).await.unwrap();

        assert_eq!(poller.state(), PollerState::Running);
        assert!(model.is_visible());
        assert_eq!(poller.watermark(), newest);
        assert_eq!(model.events().len(), 2);
        assert!(poller.inner.timer.lock().is_armed());
        assert_eq!(source.queried()[0].0, "app");
    }

    #[tokio::test]
    async fn test_empty_batch_shows_indicator_without_moving_watermark() {
        let source = FakeSource::new(vec![]);
        let (poller, model) = poller(source, Arc::new(BoundProject::bound("app")));
        let persisted = NotificationData {
            is_enabled: true,
            last_notification_date: now() - TimeDelta::hours(2),
        };

        poller.start(Some(persisted.clone())).await.unwrap();

        assert!(model.is_visible());
        assert_eq!(poller.watermark(), persisted.last_notification_date);
    }

    #[tokio::test]
    async fn test_older_events_do_not_regress_watermark() {
        let persisted = now() - TimeDelta::hours(1);
        let source = FakeSource::new(vec![Ok(NotificationOutcome::Events(vec![event(
            persisted - TimeDelta::hours(3),
        )]))]);
        let (poller, _) = poller(source, Arc::new(BoundProject::bound("app")));

        poller
            .start(Some(NotificationData {
                is_enabled: true,
                last_notification_date: persisted,
            }))
            .await
            .unwrap();

        assert_eq!(poller.watermark(), persisted);
    }

    #[tokio::test]
    async fn test_transient_failure_keeps_polling() {
        let source = FakeSource::new(vec![Err(SessionError::RemoteOperationFailed {
            operation: "api/developers/search_events",
            status: StatusCode::SERVICE_UNAVAILABLE,
        })]);
        let (poller, model) = poller(source, Arc::new(BoundProject::bound("app")));
        let before = poller.watermark();

        poller.start(None).await.unwrap();

        assert_eq!(poller.state(), PollerState::Running);
        assert!(!model.is_visible());
        assert!(poller.watermark() >= before);
        assert!(model.events().is_empty());
    }

    #[tokio::test]
    async fn test_unbound_or_disconnected_changes_nothing() {
        let source = FakeSource::new(vec![]);
        let binding = Arc::new(BoundProject::new());
        let (poller, model) = poller(source.clone(), binding.clone());

        poller.start(None).await.unwrap();
        assert!(source.queried().is_empty());
        assert!(!model.is_visible());
        assert_eq!(poller.state(), PollerState::Running);
        poller.stop();

        binding.bind("app");
        source.connected.store(false, Ordering::SeqCst);
        poller.start(None).await.unwrap();
        assert!(source.queried().is_empty());
    }

    #[tokio::test]
    async fn test_start_restores_enabled_flag() {
        let source = FakeSource::new(vec![]);
        let (poller, model) = poller(source, Arc::new(BoundProject::bound("app")));
        let date = now() - TimeDelta::hours(3);

        poller
            .start(Some(NotificationData {
                is_enabled: false,
                last_notification_date: date,
            }))
            .await
            .unwrap();

        assert!(!model.is_enabled());
        assert_eq!(
            poller.current_watermark(),
            NotificationData {
                is_enabled: false,
                last_notification_date: date,
            }
        );

        poller.stop();
        poller.start(None).await.unwrap();
        assert!(model.is_enabled());
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected_and_stop_is_idempotent() {
        let source = FakeSource::new(vec![]);
        let (poller, model) = poller(source, Arc::new(BoundProject::bound("app")));

        poller.start(None).await.unwrap();
        assert_eq!(poller.start(None).await, Err(PollerError::AlreadyRunning));

        poller.stop();
        assert_eq!(poller.state(), PollerState::Stopped);
        assert!(!model.is_visible());
        assert!(!poller.inner.timer.lock().is_armed());

        model.set_visible(true);
        poller.stop();
        assert!(model.is_visible());
    }

    #[tokio::test]
    async fn test_clamps_stale_persisted_date() {
        let source = FakeSource::new(vec![]);
        let (poller, _) = poller(source.clone(), Arc::new(BoundProject::bound("app")));
        let before = now();

        poller
            .start(Some(NotificationData {
                is_enabled: true,
                last_notification_date: at("2000-01-01T00:00:00+01:00"),
            }))
            .await
            .unwrap();

        let watermark = poller.watermark();
        assert!(watermark >= before - TimeDelta::hours(24));
        assert!(watermark <= now() - TimeDelta::hours(24));
        assert_eq!(source.queried()[0].1, watermark);
    }
}
