mod config_cmd;
mod place;
mod reservation;
mod sync_cmd;
mod worker_cmd;

pub use config_cmd::ConfigCommand;
pub use place::PlaceCommand;
pub use reservation::ReservationCommand;
pub use sync_cmd::SyncCommand;
pub use worker_cmd::WorkerCommand;
