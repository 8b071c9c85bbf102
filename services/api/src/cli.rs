use crate::inspect::{run_dashboard, run_qualify, DashboardArgs, QualifyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use privilege_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Student Privilege Portal",
    about = "Serve the privilege catalog or inspect eligibility from the command line",
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
    /// Print a student's achieved, nearly achieved, and unavailable privileges
    Dashboard(DashboardArgs),
    /// List the students who qualify for a privilege
    Qualify(QualifyArgs),
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
        Command::Dashboard(args) => run_dashboard(args),
        Command::Qualify(args) => run_qualify(args),
    }
}
