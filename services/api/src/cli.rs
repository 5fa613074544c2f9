use crate::demo::{run_demo, run_predict, DemoArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pulley_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pulley Inspection Service",
    about = "Score pulley inspections and run the inspection record service",
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
    /// Score inspections from a file or from individual readings
    Predict(PredictArgs),
    /// Register sample pulleys, submit sample inspections and print the reports
    Demo(DemoArgs),
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
        Command::Predict(args) => run_predict(args),
        Command::Demo(args) => run_demo(args),
    }
}
