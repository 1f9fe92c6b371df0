use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Quote {
            snapshot,
            strike_id,
            put,
            sell,
            size,
            iterations,
            force_close,
            json,
        } => commands::quote::run(&commands::quote::QuoteArgs {
            snapshot,
            strike_id,
            put,
            sell,
            size,
            iterations,
            force_close,
            json,
        }),
        cli::Command::Example => commands::example::run(),
        cli::Command::Reconstruct { events } => commands::reconstruct::run(&events),
        cli::Command::Trades {
            snapshot,
            from_block,
            to_block,
            account,
            rpc_url,
        } => commands::trades::run(&commands::trades::TradesArgs {
            snapshot,
            from_block,
            to_block,
            account,
            rpc_url,
        }),
    }
}
