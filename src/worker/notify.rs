use sha2::{Digest, Sha256};

/// Title shared by all reservation reminders.
pub const REMINDER_TITLE: &str = "Recordatorio de Reserva";

/// Sink for reminder notifications.
///
/// Implementations must not fail loudly; a notification that cannot be
/// delivered is skipped, never an error the worker has to handle.
pub trait Notifier: Send + Sync {
    /// Emits one reminder. `key` is stable per reservation so a repeated
    /// reminder overwrites the previous one instead of stacking.
    fn notify(&self, key: u32, title: &str, message: &str);
}

/// Prints reminders to stdout. Stands in for the platform notification tray
/// when running from a terminal.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, key: u32, title: &str, message: &str) {
        println!("🔔 [{}] {}: {}", key, title, message);
    }
}

/// Stable notification key for a reservation id.
pub fn reminder_key(reservation_id: &str) -> u32 {
    let digest = Sha256::digest(reservation_id.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Message wording by day count.
pub fn reminder_message(days_until: i64, place_name: &str) -> String {
    match days_until {
        0 => format!("¡Tu visita a {} es HOY!", place_name),
        1 => format!("Mañana tienes tu visita a {}", place_name),
        7 => format!("En una semana visitarás {}", place_name),
        _ => format!("En {} días visitarás {}", days_until, place_name),
    }
}

#[cfg(test)]
pub(crate) struct RecordingNotifier {
    pub hits: std::sync::Mutex<Vec<(u32, String)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self {
            hits: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, key: u32, _title: &str, message: &str) {
        self.hits.lock().unwrap().push((key, message.to_string()));
    }
}
