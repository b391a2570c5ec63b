use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// jamguide - Bay Area music jam directory
#[derive(Parser)]
#[command(name = "jamguide")]
#[command(about = "Recurring music jams, their calendar and reviews", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Review ownership claims
    Claims {
        #[command(subcommand)]
        command: ClaimCommands,
    },
    /// Moderate submitted jams
    Jams {
        #[command(subcommand)]
        command: JamCommands,
    },
}

#[derive(Subcommand)]
enum ClaimCommands {
    /// List claims, oldest first
    List {
        #[arg(long, value_enum)]
        status: Option<cli::admin::ClaimStatusArg>,
    },
    /// Approve a pending claim and hand the jam to the claimant
    Approve { id: i64 },
    /// Reject a pending claim
    Reject { id: i64 },
}

#[derive(Subcommand)]
enum JamCommands {
    /// List submissions waiting for approval
    Pending,
    /// Publish a jam
    Approve { id: i64 },
    /// Hide a jam from the listing
    Reject { id: i64 },
    /// Change a jam's details
    Edit {
        id: i64,
        #[command(flatten)]
        fields: cli::admin::JamEditArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = jamguide::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    jamguide::observability::init_observability(
        "jamguide",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Migrate => cli::migrate(config).await,
        Commands::Reset => cli::reset(config).await,
        Commands::Claims { command } => match command {
            ClaimCommands::List { status } => cli::admin::list_claims(config, status).await,
            ClaimCommands::Approve { id } => cli::admin::approve_claim(config, id).await,
            ClaimCommands::Reject { id } => cli::admin::reject_claim(config, id).await,
        },
        Commands::Jams { command } => match command {
            JamCommands::Pending => cli::admin::list_pending(config).await,
            JamCommands::Approve { id } => {
                cli::admin::set_status(config, id, jamguide_jam::JamStatus::Active).await
            }
            JamCommands::Reject { id } => {
                cli::admin::set_status(config, id, jamguide_jam::JamStatus::Rejected).await
            }
            JamCommands::Edit { id, fields } => cli::admin::edit(config, id, fields).await,
        },
    }
}
