use ordermgr_sdk::{ops::OrderTransitionOps, programs::OrderStatus, TradeId};

/// Set the status of an order, signed by the admin.
#[derive(Debug, clap::Args)]
pub struct SetState {
    trade_id: TradeId,
    /// Target status, e.g. `Shipped`.
    status: OrderStatus,
}

impl super::Command for SetState {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        match client.try_set_order_state(self.trade_id, self.status).await {
            Ok(signature) => {
                println!("{signature}");
                Ok(())
            }
            Err(err) => {
                for line in err.program_logs() {
                    tracing::error!("{line}");
                }
                Err(err.into())
            }
        }
    }
}
