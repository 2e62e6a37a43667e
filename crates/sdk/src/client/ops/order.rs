use std::{future::Future, ops::Deref};

use ordermgr_programs::{
    anchor_lang::{AccountDeserialize, Discriminator},
    instruction::{accounts, SetOrderState},
    OrderState, OrderStatus,
};
use ordermgr_solana_utils::transaction_builder::TransactionBuilder;
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::{signature::Signature, signer::Signer};

use crate::{client::Ledger, serde::OrderData, Client, TradeId};

/// Read operations for order accounts.
pub trait OrderReadOps {
    /// Fetch and project every order account of the program.
    ///
    /// Fails if the fetch fails or any account cannot be decoded.
    fn try_list_all_orders(&self) -> impl Future<Output = crate::Result<Vec<OrderData>>> + Send;

    /// Fetch and project every order account of the program.
    ///
    /// Failures are logged and reported as an empty list.
    fn list_all_orders(&self) -> impl Future<Output = Vec<OrderData>> + Send;

    /// Fetch the order of the given trade, `None` if it does not exist.
    fn fetch_order(
        &self,
        trade_id: &TradeId,
    ) -> impl Future<Output = crate::Result<Option<OrderData>>> + Send;
}

/// Admin operations changing the status of orders.
pub trait OrderTransitionOps<C> {
    /// Build the `set_order_state` transaction without sending it.
    fn set_order_state_transaction(
        &self,
        trade_id: &TradeId,
        status: OrderStatus,
    ) -> TransactionBuilder<C>;

    /// Move the order of the trade to `status`, signed by the admin.
    ///
    /// Inputs are validated before any ledger call. Transitions of the same
    /// trade are applied one at a time.
    fn try_set_order_state<T, S>(
        &self,
        trade_id: T,
        status: S,
    ) -> impl Future<Output = crate::Result<Signature>> + Send
    where
        T: TryInto<TradeId>,
        T::Error: Into<crate::Error>,
        S: TryInto<OrderStatus>,
        S::Error: Into<crate::Error>;

    /// Same as [`try_set_order_state`](Self::try_set_order_state), but failures
    /// are logged together with the program logs and reported as `None`.
    fn set_order_state<T, S>(
        &self,
        trade_id: T,
        status: S,
    ) -> impl Future<Output = Option<Signature>> + Send
    where
        T: TryInto<TradeId>,
        T::Error: Into<crate::Error>,
        S: TryInto<OrderStatus>,
        S::Error: Into<crate::Error>;
}

impl<C: Deref<Target = impl Signer> + Clone + Send + Sync, L: Ledger> OrderReadOps
    for Client<C, L>
{
    async fn try_list_all_orders(&self) -> crate::Result<Vec<OrderData>> {
        // Full scan of the program accounts.
        let filters = vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            0,
            OrderState::DISCRIMINATOR,
        ))];
        let (slot, accounts) = self
            .ledger()
            .program_accounts(self.program_id(), filters)
            .await?
            .split();
        let orders = accounts
            .into_iter()
            .map(|(address, account)| {
                let order = OrderState::try_deserialize(&mut account.data.as_slice())
                    .map_err(|err| crate::Error::Decode(format!("order {address}: {err}")))?;
                Ok(OrderData::from_state(&address, &order))
            })
            .collect::<crate::Result<Vec<_>>>()?;
        tracing::info!(slot, count = orders.len(), "fetched orders");
        Ok(orders)
    }

    async fn list_all_orders(&self) -> Vec<OrderData> {
        match self.try_list_all_orders().await {
            Ok(orders) => orders,
            Err(err) => {
                tracing::error!(%err, "failed to list orders");
                vec![]
            }
        }
    }

    async fn fetch_order(&self, trade_id: &TradeId) -> crate::Result<Option<OrderData>> {
        let address = self.find_order_address(trade_id);
        let order = self.account::<OrderState>(&address).await?;
        Ok(order.map(|order| OrderData::from_state(&address, &order)))
    }
}

impl<C: Deref<Target = impl Signer> + Clone + Send + Sync, L: Ledger> Client<C, L> {
    async fn transition(&self, trade_id: TradeId, status: OrderStatus) -> crate::Result<Signature> {
        let _guard = self.trade_locks().lock(trade_id).await;
        let blockhash = self.ledger().latest_blockhash().await?;
        let transaction = self
            .set_order_state_transaction(&trade_id, status)
            .signed_transaction_with_blockhash(blockhash)?;
        tracing::debug!(%trade_id, %status, "sending set_order_state");
        let signature = self.ledger().send_and_confirm(&transaction).await?;
        tracing::info!(%trade_id, %status, %signature, "order state updated");
        Ok(signature)
    }
}

fn validate<T, S>(trade_id: T, status: S) -> crate::Result<(TradeId, OrderStatus)>
where
    T: TryInto<TradeId>,
    T::Error: Into<crate::Error>,
    S: TryInto<OrderStatus>,
    S::Error: Into<crate::Error>,
{
    let trade_id = trade_id.try_into().map_err(Into::into)?;
    let status = status.try_into().map_err(Into::into)?;
    Ok((trade_id, status))
}

impl<C: Deref<Target = impl Signer> + Clone + Send + Sync, L: Ledger>
    OrderTransitionOps<C> for Client<C, L>
{
    fn set_order_state_transaction(
        &self,
        trade_id: &TradeId,
        status: OrderStatus,
    ) -> TransactionBuilder<C> {
        self.transaction()
            .anchor_accounts(accounts::SetOrderState {
                admin: self.payer(),
                order_state: self.find_order_address(trade_id),
                config_state: self.find_config_address(),
            })
            .anchor_args(SetOrderState {
                trade_id: trade_id.get(),
                new_status: status,
            })
    }

    fn try_set_order_state<T, S>(
        &self,
        trade_id: T,
        status: S,
    ) -> impl Future<Output = crate::Result<Signature>> + Send
    where
        T: TryInto<TradeId>,
        T::Error: Into<crate::Error>,
        S: TryInto<OrderStatus>,
        S::Error: Into<crate::Error>,
    {
        let args = validate(trade_id, status);
        async move {
            let (trade_id, status) = args?;
            self.transition(trade_id, status).await
        }
    }

    fn set_order_state<T, S>(
        &self,
        trade_id: T,
        status: S,
    ) -> impl Future<Output = Option<Signature>> + Send
    where
        T: TryInto<TradeId>,
        T::Error: Into<crate::Error>,
        S: TryInto<OrderStatus>,
        S::Error: Into<crate::Error>,
    {
        let args = validate(trade_id, status);
        async move {
            let (trade_id, status) = match args {
                Ok(args) => args,
                Err(err) => {
                    tracing::error!(%err, "rejected order state request");
                    return None;
                }
            };
            match self.transition(trade_id, status).await {
                Ok(signature) => Some(signature),
                Err(err) => {
                    tracing::error!(%trade_id, %status, %err, "failed to set order state");
                    for line in err.program_logs() {
                        tracing::error!(%trade_id, "{line}");
                    }
                    None
                }
            }
        }
    }
}
