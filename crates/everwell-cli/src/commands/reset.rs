use super::CliResult;

pub async fn run() -> CliResult {
    let engine = super::engine().await?;
    engine.reset_all().await?;
    println!("all progress reset (user id kept: {})", engine.user_id());
    Ok(())
}
