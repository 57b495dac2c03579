use serde_json::json;

use super::CliResult;

pub async fn status() -> CliResult {
    let engine = super::engine().await?;
    let (state, eval) = engine.evaluate_on_load().await?;
    let focus = engine.focus_pillar().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "is_logged_today": eval.is_logged_today,
            "streak": eval.streak,
            "total_days_logged": state.total_days_logged,
            "last_log_date": state.last_log_date,
            "focus_pillar": focus,
        }))?
    );
    Ok(())
}

pub async fn check_in() -> CliResult {
    let engine = super::engine().await?;
    let outcome = engine.log_today().await?;

    if outcome.already_logged {
        println!("already logged today (streak {})", outcome.state.streak);
    } else {
        println!(
            "logged {} (streak {}, {} days total)",
            everwell_core::today(),
            outcome.state.streak,
            outcome.state.total_days_logged
        );
    }
    Ok(())
}
