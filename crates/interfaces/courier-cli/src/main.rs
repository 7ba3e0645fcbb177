use clap::{Parser, Subcommand};
use courier_cli::{commands, RequestArgs};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Simulator base URL
    #[arg(
        long,
        global = true,
        env = courier_config::SIMULATOR_URL_ENV,
        default_value = courier_config::DEFAULT_SIMULATOR_URL
    )]
    url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fire one simulation and stream its audit trail
    Run {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// List the scenario presets with their resolved parameters
    Presets,
    /// Print the simulate URL for the given parameters
    Url {
        #[command(flatten)]
        request: RequestArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run { request } => {
            commands::cmd_run(cli.url, request.resolve()).await?;
        }
        Commands::Presets => commands::cmd_presets(),
        Commands::Url { request } => {
            commands::cmd_url(&cli.url, request.resolve());
        }
    }

    Ok(())
}
