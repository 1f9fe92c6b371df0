use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Options AMM toolkit: price trades the way the market's AMM would fill
/// them, and rebuild trade history from on-chain events.
#[derive(Parser)]
#[command(name = "options-amm", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Quote a trade against a market snapshot
    Quote {
        /// Path to the market snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Strike to trade
        #[arg(long)]
        strike_id: u64,

        /// Quote the put instead of the call
        #[arg(long)]
        put: bool,

        /// Quote a sell instead of a buy
        #[arg(long)]
        sell: bool,

        /// Number of options, as a decimal (e.g. "2.5")
        #[arg(long)]
        size: String,

        /// Number of sub-trades the fill is simulated in
        #[arg(long)]
        iterations: Option<u32>,

        /// Price as a force close
        #[arg(long)]
        force_close: bool,

        /// Print the full quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Output an example market snapshot JSON to stdout
    Example,

    /// Rebuild trades from a stored event batch JSON file
    Reconstruct {
        /// Path to the event batch JSON file
        #[arg(long)]
        events: PathBuf,
    },

    /// Fetch and rebuild a market's trades from an RPC node
    Trades {
        /// Market snapshot JSON file identifying the market
        #[arg(long)]
        snapshot: PathBuf,

        /// First block of the range (inclusive)
        #[arg(long)]
        from_block: u64,

        /// Last block of the range (inclusive)
        #[arg(long)]
        to_block: u64,

        /// Only show trades whose position is now held by this address
        #[arg(long)]
        account: Option<String>,

        /// RPC endpoint (default: the market chain's public RPC)
        #[arg(long, env = "OPTIONS_AMM_RPC_URL")]
        rpc_url: Option<String>,
    },
}
