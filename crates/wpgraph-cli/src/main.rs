//! wpgraph: CLI for the WordPress vulnerability graph sync tool

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wpgraph_cli::commands;

#[derive(Parser)]
#[command(name = "wpgraph")]
#[command(author, version, about = "WordPress vulnerability graph sync tool", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync plugins, core versions, and compatibility edges into Neo4j
    Sync {
        /// WPScan API token
        #[arg(long)]
        wpscan_token: String,

        /// Neo4j connection URI
        #[arg(long, default_value = "bolt://localhost:7687")]
        neo4j_uri: String,

        /// Neo4j username
        #[arg(long, default_value = "neo4j")]
        neo4j_user: String,

        /// Neo4j password
        #[arg(long)]
        neo4j_password: String,
    },

    /// Show graph statistics
    Stats {
        /// Neo4j connection URI
        #[arg(long, default_value = "bolt://localhost:7687")]
        neo4j_uri: String,

        /// Neo4j username
        #[arg(long, default_value = "neo4j")]
        neo4j_user: String,

        /// Neo4j password
        #[arg(long)]
        neo4j_password: String,
    },

    /// List stored core versions inside a requires/tested range
    Versions {
        /// Minimum required WordPress version (absent = open-ended)
        #[arg(long)]
        requires: Option<String>,

        /// Highest tested WordPress version (absent = open-ended)
        #[arg(long)]
        tested: Option<String>,

        /// Neo4j connection URI
        #[arg(long, default_value = "bolt://localhost:7687")]
        neo4j_uri: String,

        /// Neo4j username
        #[arg(long, default_value = "neo4j")]
        neo4j_user: String,

        /// Neo4j password
        #[arg(long)]
        neo4j_password: String,
    },

    /// Execute a raw Cypher query
    Query {
        /// Cypher query to execute
        query: String,

        /// Neo4j connection URI
        #[arg(long, default_value = "bolt://localhost:7687")]
        neo4j_uri: String,

        /// Neo4j username
        #[arg(long, default_value = "neo4j")]
        neo4j_user: String,

        /// Neo4j password
        #[arg(long)]
        neo4j_password: String,
    },
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Sync {
            wpscan_token,
            neo4j_uri,
            neo4j_user,
            neo4j_password,
        } => {
            commands::sync::run(&neo4j_uri, &neo4j_user, &neo4j_password, &wpscan_token).await?;
        }
        Commands::Stats {
            neo4j_uri,
            neo4j_user,
            neo4j_password,
        } => {
            commands::stats::run(&neo4j_uri, &neo4j_user, &neo4j_password).await?;
        }
        Commands::Versions {
            requires,
            tested,
            neo4j_uri,
            neo4j_user,
            neo4j_password,
        } => {
            commands::versions::run(
                requires.as_deref(),
                tested.as_deref(),
                &neo4j_uri,
                &neo4j_user,
                &neo4j_password,
            )
            .await?;
        }
        Commands::Query {
            query,
            neo4j_uri,
            neo4j_user,
            neo4j_password,
        } => {
            commands::query::run(&query, &neo4j_uri, &neo4j_user, &neo4j_password).await?;
        }
    }

    Ok(())
}
