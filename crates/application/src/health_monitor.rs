use std::sync::Arc;
use std::time::Duration;

use taskdeck_core::{AppError, AppResult};
use taskdeck_domain::HealthStatus;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::AdminRepository;

/// Latest outcome of the periodic health check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HealthReading {
    /// No check has completed yet.
    #[default]
    Pending,
    /// The API answered.
    Reported(HealthStatus),
    /// The check failed; carries the user-facing message.
    Unreachable(String),
}

/// Fixed-interval health poller tied to the lifetime of its owner.
///
/// Dropping the monitor stops the timer task.
pub struct HealthMonitor {
    readings: watch::Receiver<HealthReading>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Starts polling immediately and then every `interval`.
    pub fn spawn(repository: Arc<dyn AdminRepository>, interval: Duration) -> AppResult<Self> {
        if interval.is_zero() {
            return Err(AppError::Validation(
                "health poll interval must be greater than zero".to_owned(),
            ));
        }

        let (sender, readings) = watch::channel(HealthReading::Pending);
        let (shutdown, mut shutdown_signal) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_signal => break,
                    _ = ticker.tick() => {
                        let reading = match repository.fetch_health().await {
                            Ok(status) => {
                                debug!(healthy = status.is_healthy(), "health check completed");
                                HealthReading::Reported(status)
                            }
                            Err(error) => {
                                warn!(error = %error, "health check failed");
                                HealthReading::Unreachable(error.user_message())
                            }
                        };

                        if sender.send(reading).is_err() {
                            break;
                        }
                    }
                }
            }

            info!("health monitor stopped");
        });

        Ok(Self {
            readings,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    /// Returns the most recent reading.
    #[must_use]
    pub fn latest(&self) -> HealthReading {
        self.readings.borrow().clone()
    }

    /// Returns a receiver notified on every new reading.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HealthReading> {
        self.readings.clone()
    }

    /// Stops polling and waits for the timer task to finish.
    pub async fn shutdown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Some(task) = self.task.take()
            && let Err(error) = task.await
        {
            warn!(error = %error, "health monitor task ended abnormally");
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use taskdeck_core::{AppError, AppResult};
    use taskdeck_domain::{
        ActivityLogEntry, DashboardStats, HealthState, HealthStatus, SystemSettings, UserSummary,
    };

    use crate::AdminRepository;

    use super::{HealthMonitor, HealthReading};

    #[derive(Default)]
    struct CheckCounter {
        checks: AtomicUsize,
    }

    #[async_trait]
    impl AdminRepository for CheckCounter {
        async fn fetch_dashboard_stats(&self) -> AppResult<DashboardStats> {
            Ok(DashboardStats::default())
        }

        async fn fetch_settings(&self) -> AppResult<SystemSettings> {
            Ok(SystemSettings::default())
        }

        async fn fetch_activity_logs(&self, _limit: usize) -> AppResult<Vec<ActivityLogEntry>> {
            Ok(Vec::new())
        }

        async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
            Ok(Vec::new())
        }

        async fn fetch_health(&self) -> AppResult<HealthStatus> {
            let check = self.checks.fetch_add(1, Ordering::SeqCst);
            if check == 0 {
                return Err(AppError::Transport("connection refused".to_owned()));
            }

            Ok(HealthStatus {
                status: HealthState::Healthy,
                checks: Default::default(),
                uptime_seconds: Some(60),
                version: None,
            })
        }
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = HealthMonitor::spawn(Arc::new(CheckCounter::default()), Duration::ZERO);
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_interval_until_shutdown() {
        let repository = Arc::new(CheckCounter::default());
        let Ok(monitor) = HealthMonitor::spawn(repository.clone(), Duration::from_secs(30)) else {
            panic!("monitor should start");
        };
        let mut readings = monitor.subscribe();

        assert!(readings.changed().await.is_ok());
        assert!(matches!(
            readings.borrow().clone(),
            HealthReading::Unreachable(_)
        ));

        assert!(readings.changed().await.is_ok());
        assert!(matches!(monitor.latest(), HealthReading::Reported(_)));

        monitor.shutdown().await;
        let checks = repository.checks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(repository.checks.load(Ordering::SeqCst), checks);
    }
}
