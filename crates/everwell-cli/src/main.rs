use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "everwell-cli", version, about = "Everwell CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily check-in status
    Status,
    /// Record today's check-in
    Log,
    /// Challenge progression
    Challenge {
        #[command(subcommand)]
        action: commands::challenge::ChallengeAction,
    },
    /// Milestone rewards
    Milestones {
        #[command(subcommand)]
        action: commands::milestones::MilestonesAction,
    },
    /// Run the schema migration and print its report
    Migrate,
    /// Reset all progress to defaults (keeps the anonymous user id)
    Reset,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::log::status().await,
        Commands::Log => commands::log::check_in().await,
        Commands::Challenge { action } => commands::challenge::run(action).await,
        Commands::Milestones { action } => commands::milestones::run(action).await,
        Commands::Migrate => commands::migrate::run().await,
        Commands::Reset => commands::reset::run().await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
