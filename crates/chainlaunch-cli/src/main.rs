mod commands;

use chainlaunch_config::ProviderConfig;
use chainlaunch_core::StateManager;
use chainlaunch_provider::{NodeJoinSpec, Provider};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chainlaunch")]
#[command(
    about = "Reconcile Chainlaunch network memberships and look up networks and key providers",
    long_about = None
)]
struct Cli {
    /// Directory holding `.chainlaunch/state.json`
    #[arg(long, global = true, env = "CHAINLAUNCH_STATE_DIR", default_value = ".")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join a peer or orderer node to a Fabric network
    Join {
        /// Resource name in the local state
        #[arg(long)]
        name: String,
        #[arg(long)]
        network_id: u64,
        #[arg(long)]
        node_id: u64,
        /// peer or orderer
        #[arg(long)]
        role: String,
    },
    /// Check that a joined node is still a member; forget it if not
    Refresh {
        #[arg(long)]
        name: String,
    },
    /// Remove a joined node from its network and forget it
    Unjoin {
        #[arg(long)]
        name: String,
    },
    /// Adopt an existing membership by its `<network_id>:<node_id>` ID
    Import {
        #[arg(long)]
        name: String,
        #[arg(long)]
        id: String,
        /// peer or orderer; cannot be derived from the ID
        #[arg(long)]
        role: Option<String>,
    },
    /// Look up a network by name or ID
    Network {
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        name: Option<String>,
        #[arg(long)]
        id: Option<u64>,
        /// fabric or besu
        #[arg(long, default_value = "fabric")]
        platform: String,
    },
    /// Fetch a key provider by ID
    KeyProvider {
        #[arg(long)]
        id: u64,
    },
    /// List resources in the local state
    State,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries command output; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let store = StateManager::new(&cli.state_dir);

    match cli.command {
        Commands::Join {
            name,
            network_id,
            node_id,
            role,
        } => {
            let spec = NodeJoinSpec {
                network_id,
                node_id,
                role,
            };
            commands::join::handle(&connect()?, &store, &name, spec).await
        }
        Commands::Refresh { name } => commands::refresh::handle(&connect()?, &store, &name).await,
        Commands::Unjoin { name } => commands::unjoin::handle(&connect()?, &store, &name).await,
        Commands::Import { name, id, role } => {
            commands::import::handle(&connect()?, &store, &name, &id, role).await
        }
        Commands::Network { name, id, platform } => {
            commands::lookup::network(&connect()?, name, id, &platform).await
        }
        Commands::KeyProvider { id } => commands::lookup::key_provider(&connect()?, id).await,
        Commands::State => commands::state::handle(&store).await,
        Commands::Version => {
            println!("chainlaunch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the provider config and build the API client
fn connect() -> anyhow::Result<Provider> {
    let config = ProviderConfig::load()?;
    tracing::debug!("Using {:?}", config);
    Ok(Provider::from_config(&config)?)
}
