use crate::demo::{run_demo, run_employer_classify, ClassifyArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Decision Engine",
    about = "Run and exercise the consumer-lending credit decision engine from the command line",
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
    /// Inspect the listed-employer directory
    Employer {
        #[command(subcommand)]
        command: EmployerCommand,
    },
    /// Run a canned applicant through the full decision pipeline
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum EmployerCommand {
    /// Classify an employer name into its trust tier
    Classify(ClassifyArgs),
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
        Command::Employer {
            command: EmployerCommand::Classify(args),
        } => run_employer_classify(args),
        Command::Demo(args) => run_demo(args),
    }
}
