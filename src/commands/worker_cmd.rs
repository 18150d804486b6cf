use clap::Args;

use crate::worker::{ReminderScheduler, ReminderWorker};

/// Run the reservation reminder worker
#[derive(Debug, Args)]
pub struct WorkerCommand {
    /// Run a single reminder check and exit
    #[arg(long)]
    once: bool,
}

impl WorkerCommand {
    pub async fn run(&self, worker: ReminderWorker) -> Result<(), Box<dyn std::error::Error>> {
        if self.once {
            let emitted = worker.run_once().await?;
            println!("{} reminder(s) emitted", emitted);
            return Ok(());
        }

        println!("Reminder worker started (checks every 24h). Press Ctrl-C to stop.");

        let scheduler = ReminderScheduler::new(worker);
        tokio::select! {
            _ = scheduler.run() => {}
            _ = tokio::signal::ctrl_c() => {
                println!("\nWorker stopped.");
            }
        }

        Ok(())
    }
}
