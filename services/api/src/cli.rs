use crate::batch::{run_batch, run_match, BatchArgs, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use school_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "school-match",
    about = "Match student profiles to universities and international schools",
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
    /// Evaluate a single student profile
    Match(MatchArgs),
    /// Import and evaluate a CSV export or a record-store listing
    Batch(BatchArgs),
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
        Command::Match(args) => run_match(args),
        Command::Batch(args) => run_batch(args),
    }
}
