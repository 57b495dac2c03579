use super::CliResult;

/// Engine initialization runs the migration; this command just surfaces
/// what it did (or that the schema was already current).
pub async fn run() -> CliResult {
    let store = everwell_core::JsonFileStore::open()?;
    let report = everwell_core::migration::migrate(&store, everwell_core::today()).await?;

    if report.performed {
        println!(
            "migrated: carried {:?}, synthesized daily log: {}",
            report.carried, report.synthesized_daily_log
        );
    } else {
        println!("schema already current, nothing to do");
    }
    Ok(())
}
