use crate::commands::{
    run_add_target, run_criteria, run_delete_target, run_rank, run_reset, run_score,
    AddTargetArgs, DeleteTargetArgs, RankArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use target_matrix::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Target Scoring Matrix",
    about = "Rank § 25A-37 referral-sales targets against a weighted rubric",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the ranked targets, optionally with session-only weight overrides
    Rank(RankArgs),
    /// Print the scoring rubric
    Criteria,
    /// Add, score, or delete stored targets
    Target {
        #[command(subcommand)]
        command: TargetCommand,
    },
    /// Replace every stored target with the seed dataset
    Reset,
}

#[derive(Subcommand, Debug)]
enum TargetCommand {
    /// Add a target; only the name is required
    Add(AddTargetArgs),
    /// Set, clamp, or clear one criterion score
    Score(ScoreArgs),
    /// Delete a target (no-op when the id is unknown)
    Delete(DeleteTargetArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Criteria => run_criteria(),
        Command::Target {
            command: TargetCommand::Add(args),
        } => run_add_target(args),
        Command::Target {
            command: TargetCommand::Score(args),
        } => run_score(args),
        Command::Target {
            command: TargetCommand::Delete(args),
        } => run_delete_target(args),
        Command::Reset => run_reset(),
    }
}
