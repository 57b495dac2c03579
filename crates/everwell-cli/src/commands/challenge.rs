use clap::Subcommand;
use everwell_core::{today, Pillar};
use serde_json::json;

use super::CliResult;

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Show a pillar's challenge state and available tasks
    Show { pillar: Pillar },
    /// Toggle a task for today
    Check { pillar: Pillar, task_id: String },
    /// Directly override the challenge day (support tooling)
    SetDay { pillar: Pillar, day: u8 },
}

pub async fn run(action: ChallengeAction) -> CliResult {
    let engine = super::engine().await?;

    match action {
        ChallengeAction::Show { pillar } => {
            let state = engine.challenge_state(pillar).await?;
            let done = state.tasks_done_on(today());
            let tasks: Vec<_> = engine
                .catalog()
                .available_on(pillar, state.current_day)
                .into_iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "name": t.name,
                        "phase": t.phase,
                        "done_today": done.contains(&t.id),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "pillar": pillar,
                    "current_day": state.current_day,
                    "complete": state.is_complete(),
                    "streak_days": state.streak_days,
                    "completed_days": state.completed_days,
                    "start_date": state.start_date,
                    "available_tasks": tasks,
                }))?
            );
        }
        ChallengeAction::Check { pillar, task_id } => {
            let out = engine.check_task(pillar, &task_id).await?;
            let state = engine.challenge_state(pillar).await?;
            let status = match (out.task_checked, out.advanced) {
                (true, true) => "checked, day passed",
                (true, false) => "checked",
                (false, _) => "unchecked",
            };
            println!("{status} (day {}, streak {})", state.current_day, state.streak_days);
        }
        ChallengeAction::SetDay { pillar, day } => {
            let state = engine.set_challenge_day(pillar, day).await?;
            println!("{pillar} challenge day set to {}", state.current_day);
        }
    }
    Ok(())
}
