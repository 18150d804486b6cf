//! Periodic reservation reminder job.
//!
//! Independent of any UI lifecycle: the scheduler runs the check once
//! immediately and then every 24 hours, gated on server reachability, and
//! treats a failed run as retryable instead of fatal.

pub mod notify;
pub mod reminder;

pub use notify::{ConsoleNotifier, Notifier};
pub use reminder::{ReminderScheduler, ReminderWorker};
