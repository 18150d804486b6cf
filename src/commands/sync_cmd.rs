use clap::Args;

use crate::config::Config;
use crate::sync::{PlaceRepository, ReservationRepository};

/// Synchronize the local cache with the remote store
#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Clear the local cache before syncing
    #[arg(long)]
    reset: bool,
}

impl SyncCommand {
    pub async fn run(
        &self,
        places: &PlaceRepository,
        reservations: &ReservationRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.reset {
            places.clear_cache().await?;
            reservations.clear_cache().await?;
            println!("Local cache cleared.");
        }

        println!("Syncing with server...");
        println!();

        let place_count = places.sync_places().await?;
        if place_count > 0 {
            println!("  ✓ places ({} updated)", place_count);
        } else {
            println!("  ✓ places (cache kept)");
        }

        let reservation_count = reservations.sync_reservations(&config.user_id).await?;
        if reservation_count > 0 {
            println!("  ✓ reservations ({} updated)", reservation_count);
        } else {
            println!("  ✓ reservations (cache kept)");
        }

        println!();
        println!("Sync complete.");
        Ok(())
    }
}
