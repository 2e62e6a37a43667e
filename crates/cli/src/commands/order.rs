use eyre::OptionExt;
use ordermgr_sdk::{ops::OrderReadOps, TradeId};

use crate::config::output::OutputFormat;

/// List all orders.
#[derive(Debug, clap::Args)]
pub struct ListOrders {
    /// Output format.
    #[arg(long, short, value_enum, default_value_t)]
    format: OutputFormat,
}

impl super::Command for ListOrders {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let mut orders = client.try_list_all_orders().await?;
        orders.sort_by_key(|order| order.trade_id);
        println!("{}", self.format.display_many(orders)?);
        Ok(())
    }
}

/// Show the order of a trade.
#[derive(Debug, clap::Args)]
pub struct ShowOrder {
    trade_id: TradeId,
    /// Output format.
    #[arg(long, short, value_enum, default_value_t)]
    format: OutputFormat,
}

impl super::Command for ShowOrder {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let order = client
            .fetch_order(&self.trade_id)
            .await?
            .ok_or_eyre("order does not exist")?;
        println!("{}", self.format.display_one(order)?);
        Ok(())
    }
}
