use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "squadlink",
    version,
    about = "Find how two players are connected through shared teams"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Connection service base URL (overrides the config file)"
    )]
    pub server: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Request timeout in milliseconds (overrides the config file)"
    )]
    pub timeout_ms: Option<u64>,
    #[arg(long, short, global = true, conflicts_with = "quiet", help = "Debug logging")]
    pub verbose: bool,
    #[arg(long, short, global = true, help = "Only log errors")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for the shortest connection between two players.
    Connect {
        player1: String,
        player2: String,
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..), help = "Path to show (1-based)")]
        path: Option<u64>,
    },
    /// Look up player name suggestions.
    Suggest { term: String },
    /// Classify a raw failure message from the connection service.
    Classify { message: String },
    /// Present a saved connection search response.
    Render {
        /// File holding a saved `/api/find_connection` response body.
        input: PathBuf,
        #[arg(long)]
        player1: String,
        #[arg(long)]
        player2: String,
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..), help = "Path to show (1-based)")]
        path: Option<u64>,
    },
    /// Interactive session reading commands from stdin.
    Session,
}
