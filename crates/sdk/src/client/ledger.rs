use std::{future::Future, time::Duration};

use ordermgr_solana_utils::{client::SendAndConfirm, utils::WithSlot};
use serde_json::json;
use solana_account_decoder::{UiAccount, UiAccountEncoding};
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig},
    rpc_filter::RpcFilterType,
    rpc_request::RpcRequest,
    rpc_response::{Response, RpcKeyedAccount},
};
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::VersionedTransaction,
};

/// Access to the remote ledger.
///
/// Every ledger call made by [`Client`](crate::Client) goes through this trait.
pub trait Ledger: Send + Sync {
    /// Fetch all accounts owned by the program that match the filters.
    fn program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> impl Future<Output = crate::Result<WithSlot<Vec<(Pubkey, Account)>>>> + Send;

    /// Fetch a single account, `None` if it does not exist.
    fn account(
        &self,
        address: &Pubkey,
    ) -> impl Future<Output = crate::Result<WithSlot<Option<Account>>>> + Send;

    /// Get a recent blockhash to sign with.
    fn latest_blockhash(&self) -> impl Future<Output = crate::Result<Hash>> + Send;

    /// Submit a signed transaction and wait for its confirmation.
    fn send_and_confirm(
        &self,
        transaction: &VersionedTransaction,
    ) -> impl Future<Output = crate::Result<Signature>> + Send;
}

/// [`Ledger`] backed by a Solana JSON-RPC endpoint.
///
/// Reads and confirmations use the commitment of the RPC client.
pub struct RpcLedger {
    rpc: RpcClient,
    confirm_timeout: Duration,
}

impl RpcLedger {
    /// Create from an RPC client.
    pub fn new(rpc: RpcClient, confirm_timeout: Duration) -> Self {
        Self {
            rpc,
            confirm_timeout,
        }
    }

    /// Get the underlying [`RpcClient`].
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Get the confirmation timeout.
    pub fn confirm_timeout(&self) -> Duration {
        self.confirm_timeout
    }

    fn account_config(&self) -> RpcAccountInfoConfig {
        RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            commitment: Some(self.rpc.commitment()),
            ..Default::default()
        }
    }
}

impl Ledger for RpcLedger {
    /// Requires RPC nodes `>= 1.17` for the context of `getProgramAccounts`.
    async fn program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> crate::Result<WithSlot<Vec<(Pubkey, Account)>>> {
        let config = RpcProgramAccountsConfig {
            filters: (!filters.is_empty()).then_some(filters),
            account_config: self.account_config(),
            with_context: Some(true),
            sort_results: None,
        };
        tracing::debug!(%program_id, ?config, "fetching program accounts");
        let res = self
            .rpc
            .send::<Response<Vec<RpcKeyedAccount>>>(
                RpcRequest::GetProgramAccounts,
                json!([program_id.to_string(), config]),
            )
            .await
            .map_err(crate::Error::from_client_error)?;
        WithSlot::new(res.context.slot, res.value)
            .map(decode_keyed_accounts)
            .transpose()
    }

    async fn account(&self, address: &Pubkey) -> crate::Result<WithSlot<Option<Account>>> {
        let config = self.account_config();
        tracing::debug!(%address, ?config, "fetching account");
        let res = self
            .rpc
            .send::<Response<Option<UiAccount>>>(
                RpcRequest::GetAccountInfo,
                json!([address.to_string(), config]),
            )
            .await
            .map_err(crate::Error::from_client_error)?;
        Ok(WithSlot::new(res.context.slot, res.value).map(|value| value.and_then(|a| a.decode())))
    }

    async fn latest_blockhash(&self) -> crate::Result<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(crate::Error::from_client_error)
    }

    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> crate::Result<Signature> {
        let config = RpcSendTransactionConfig {
            preflight_commitment: Some(self.rpc.commitment().commitment),
            ..Default::default()
        };
        let signature = self
            .rpc
            .send_and_confirm_with_timeout(transaction, config, self.confirm_timeout)
            .await?;
        Ok(signature)
    }
}

fn decode_keyed_accounts(accounts: Vec<RpcKeyedAccount>) -> crate::Result<Vec<(Pubkey, Account)>> {
    accounts
        .into_iter()
        .map(|RpcKeyedAccount { pubkey, account }| {
            let address: Pubkey = pubkey
                .parse()
                .map_err(|_| crate::Error::Decode(format!("invalid pubkey `{pubkey}`")))?;
            let account: Account = account
                .decode()
                .ok_or_else(|| crate::Error::Decode(format!("undecodable account {pubkey}")))?;
            Ok((address, account))
        })
        .collect()
}
