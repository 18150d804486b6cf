use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::notify::{reminder_key, reminder_message, Notifier, REMINDER_TITLE};
use crate::models::Reservation;
use crate::remote::RemoteClient;
use crate::sync::{ReservationRepository, ReservationSyncError};

/// Target cadence between reminder checks.
pub const RUN_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
/// Delay before retrying after a failed or deferred run.
pub const RETRY_DELAY: Duration = Duration::from_secs(15 * 60);

/// Day offsets that trigger a reminder.
const REMINDER_DAYS: [i64; 3] = [7, 1, 0];

/// Background reminder check.
///
/// Each run re-syncs the user's reservations (best effort), reads the
/// Confirmed rows from the cache and emits a reminder for every reservation
/// whose visit is exactly 7, 1 or 0 days away.
pub struct ReminderWorker {
    reservations: ReservationRepository,
    remote: RemoteClient,
    user_id: String,
    notifier: Arc<dyn Notifier>,
}

impl ReminderWorker {
    pub fn new(
        reservations: ReservationRepository,
        remote: RemoteClient,
        user_id: String,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            reservations,
            remote,
            user_id,
            notifier,
        }
    }

    /// Connectivity precondition for a scheduled run.
    pub async fn online(&self) -> bool {
        self.remote.check_server().await
    }

    /// One worker run. Returns the number of reminders emitted.
    ///
    /// The sync step swallows remote failures internally, so a flaky network
    /// never blocks reminders: whatever is cached locally is used. Local
    /// store errors do propagate; the scheduler treats them as retryable.
    pub async fn run_once(&self) -> Result<usize, ReservationSyncError> {
        self.reservations.sync_reservations(&self.user_id).await?;

        let confirmed = self.reservations.confirmed_reservations().await?;
        let today = Local::now().date_naive();
        Ok(self.check_upcoming(today, &confirmed))
    }

    /// Day-difference check over already-materialized rows.
    ///
    /// Both endpoints are normalized to local midnight before subtracting so
    /// partial-day components cannot shift the count.
    fn check_upcoming(&self, today: NaiveDate, reservations: &[Reservation]) -> usize {
        let mut emitted = 0;

        for reservation in reservations {
            let visit_day = reservation.fecha.with_timezone(&Local).date_naive();
            let days_until = (visit_day - today).num_days();

            if REMINDER_DAYS.contains(&days_until) {
                self.notifier.notify(
                    reminder_key(&reservation.id),
                    REMINDER_TITLE,
                    &reminder_message(days_until, &reservation.place_name),
                );
                emitted += 1;
            }
        }

        emitted
    }
}

/// Drives [`ReminderWorker`] on a fixed cadence.
///
/// Runs once immediately, then every [`RUN_INTERVAL`]. An offline probe or a
/// failed run defers to [`RETRY_DELAY`] instead of killing the loop.
pub struct ReminderScheduler {
    worker: ReminderWorker,
    interval: Duration,
    retry_delay: Duration,
}

impl ReminderScheduler {
    pub fn new(worker: ReminderWorker) -> Self {
        Self {
            worker,
            interval: RUN_INTERVAL,
            retry_delay: RETRY_DELAY,
        }
    }

    #[cfg(test)]
    fn with_delays(worker: ReminderWorker, interval: Duration, retry_delay: Duration) -> Self {
        Self {
            worker,
            interval,
            retry_delay,
        }
    }

    /// Runs the check loop until the task is dropped or aborted.
    pub async fn run(self) {
        loop {
            if !self.worker.online().await {
                tracing::warn!("Reminder check deferred: server unreachable");
                tokio::time::sleep(self.retry_delay).await;
                continue;
            }

            match self.worker.run_once().await {
                Ok(emitted) => {
                    tracing::info!("Reminder check complete, {} reminder(s) emitted", emitted);
                    tokio::time::sleep(self.interval).await;
                }
                Err(e) => {
                    tracing::error!("Reminder check failed, will retry: {}", e);
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }

    /// Spawns the loop on the runtime. Re-registering means aborting the
    /// previous handle and starting a new one.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
