use ordermgr_sdk::{pda, TradeId};

/// Derive program addresses without touching the ledger.
#[derive(Debug, clap::Args)]
pub struct Pda {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Address of the config account.
    Config,
    /// Address of the order account of a trade.
    Order { trade_id: TradeId },
}

impl super::Command for Pda {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let program_id = ctx.config().program_id();
        let (address, bump) = match &self.command {
            Command::Config => pda::find_config_address(program_id),
            Command::Order { trade_id } => pda::find_order_address(trade_id, program_id),
        };
        println!("{address} (bump {bump})");
        Ok(())
    }
}
