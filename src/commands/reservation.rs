use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Subcommand, ValueEnum};

use crate::config::Config;
use crate::models::Reservation;
use crate::sync::{PlaceRepository, ReservationRepository};
use crate::view;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ReservationCommand {
    #[command(subcommand)]
    pub command: ReservationSubcommand,
}

#[derive(Subcommand)]
pub enum ReservationSubcommand {
    /// List reservations, split into upcoming and history
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Book a visit to a place
    Create {
        /// Place id (must be in the local cache)
        place_id: i64,

        /// Visit date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Party size
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        people: u32,
    },

    /// Cancel a reservation
    Cancel {
        /// Reservation id
        id: String,
    },
}

impl ReservationCommand {
    pub async fn run(
        &self,
        places: &PlaceRepository,
        reservations: &ReservationRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ReservationSubcommand::List { format } => {
                let snapshot = reservations.reservations().borrow().clone();
                let lists = view::partition(&snapshot);

                match format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&serde_json::json!({
                                "upcoming": lists.upcoming,
                                "history": lists.history,
                            }))?
                        );
                    }
                    OutputFormat::Text => {
                        if lists.upcoming.is_empty() && lists.history.is_empty() {
                            println!("No reservations. Run 'sync' or create one.");
                            return Ok(());
                        }
                        if !lists.upcoming.is_empty() {
                            println!("Upcoming:");
                            for reservation in &lists.upcoming {
                                println!("  {}  {}", reservation.id, reservation);
                            }
                        }
                        if !lists.history.is_empty() {
                            println!("History:");
                            for reservation in &lists.history {
                                println!("  {}  {}", reservation.id, reservation);
                            }
                        }
                    }
                }
            }

            ReservationSubcommand::Create {
                place_id,
                date,
                people,
            } => {
                let place = places
                    .get(*place_id)
                    .await?
                    .ok_or_else(|| format!("Place {} is not in the local cache", place_id))?;

                let fecha = local_midnight(*date)?;
                let reservation = Reservation::new(
                    place.id,
                    place.name.clone(),
                    place.imagen.clone(),
                    config.user_id.clone(),
                    fecha,
                    *people,
                    place.precio * f64::from(*people),
                );

                reservations.create_reservation(&reservation).await?;
                println!(
                    "Reserva confirmada: {} on {} for {} persona(s), S/ {:.2} (id {})",
                    place.name,
                    date,
                    people,
                    reservation.precio_total,
                    reservation.id
                );
            }

            ReservationSubcommand::Cancel { id } => {
                reservations.cancel_reservation(id).await?;
                println!("Reserva cancelada: {}", id);
            }
        }

        Ok(())
    }
}

/// Local midnight of the given calendar day, as a UTC instant.
fn local_midnight(date: NaiveDate) -> Result<chrono::DateTime<Utc>, String> {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Invalid local date: {}", date))
}
