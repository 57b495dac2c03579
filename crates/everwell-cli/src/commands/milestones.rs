use clap::Subcommand;
use everwell_core::Pillar;
use serde_json::json;

use super::CliResult;

#[derive(Subcommand)]
pub enum MilestonesAction {
    /// Reached and acknowledged milestones for a pillar
    Show { pillar: Pillar },
    /// Mark a milestone banner as shown
    Ack { pillar: Pillar, day: u8 },
}

pub async fn run(action: MilestonesAction) -> CliResult {
    let engine = super::engine().await?;

    match action {
        MilestonesAction::Show { pillar } => {
            let reached = engine.milestones(pillar).await?;
            let acked = engine
                .acknowledged_milestones()
                .await?
                .remove(&pillar)
                .unwrap_or_default();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "pillar": pillar,
                    "reached": reached,
                    "acknowledged": acked,
                }))?
            );
        }
        MilestonesAction::Ack { pillar, day } => {
            engine.acknowledge_milestone(pillar, day).await?;
            println!("acknowledged day-{day} milestone for {pillar}");
        }
    }
    Ok(())
}
