use crate::demo::{
    run_assess, run_combine, run_demo, run_range, AssessArgs, CombineArgs, RangeArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use claim_rating::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Claim Rating Engine",
    about = "Combine disability ratings and assess compensation, TDIU, and SMC entitlement",
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
    /// Assess a claim submission read from a JSON file
    Assess(AssessArgs),
    /// Combine bare percentages and print the audit trail
    Combine(CombineArgs),
    /// Estimate the best- and worst-case combined rating for undecided conditions
    Range(RangeArgs),
    /// Walk through a sample claim using the built-in catalog and rate table
    Demo,
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
        Command::Assess(args) => run_assess(args),
        Command::Combine(args) => run_combine(args),
        Command::Range(args) => run_range(args),
        Command::Demo => run_demo(),
    }
}
