use clap::{Args, Parser, Subcommand};

/// Quartermaster command-line interface.
#[derive(Debug, Parser)]
#[command(name = "qm", about = "Inventory and stock ledger service", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Mint a bearer token for a user id
    Token(TokenArgs),
    /// Check item stock totals against the ledger sums
    Audit(AuditArgs),
    /// Show the effective server configuration
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Bind address, overriding the configuration file
    #[arg(long)]
    pub bind: Option<String>,

    /// Token signing secret, overriding the configuration file
    #[arg(long)]
    pub secret: Option<String>,

    /// Load the demonstration catalog, accounts, and ledger entries
    #[arg(long)]
    pub seed: bool,
}

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User id the token is minted for
    pub user: String,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Token signing secret, overriding the configuration file
    #[arg(long)]
    pub secret: Option<String>,

    /// Token lifetime in seconds, 0 for no expiry
    #[arg(long)]
    pub ttl: Option<u64>,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit the demonstration dataset instead of an empty store
    #[arg(long)]
    pub seed: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,
}
