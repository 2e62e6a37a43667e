use std::{future::Future, time::Duration};

use solana_client::{
    client_error::ClientError as SolanaClientError, nonblocking::rpc_client::RpcClient,
    rpc_client::SerializableTransaction, rpc_config::RpcSendTransactionConfig,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, signature::Signature, transaction::VersionedTransaction,
};
use tokio::time::{sleep, timeout};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Send a transaction and wait for its confirmation.
pub trait SendAndConfirm {
    /// Send the transaction once and poll its status at the client commitment
    /// until it is confirmed, fails, its blockhash expires or `confirm_timeout` elapses.
    fn send_and_confirm_with_timeout(
        &self,
        transaction: &VersionedTransaction,
        config: RpcSendTransactionConfig,
        confirm_timeout: Duration,
    ) -> impl Future<Output = crate::Result<Signature>> + Send;
}

impl SendAndConfirm for RpcClient {
    async fn send_and_confirm_with_timeout(
        &self,
        transaction: &VersionedTransaction,
        config: RpcSendTransactionConfig,
        confirm_timeout: Duration,
    ) -> crate::Result<Signature> {
        let signature = self
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(Box::new)?;
        tracing::debug!(%signature, "transaction sent, waiting for confirmation");

        match timeout(confirm_timeout, wait_for_confirmation(self, transaction, signature)).await
        {
            Ok(res) => res,
            Err(_) => {
                tracing::warn!(%signature, ?confirm_timeout, "confirmation timed out");
                Err(crate::Error::ConfirmationTimeout(confirm_timeout))
            }
        }
    }
}

async fn wait_for_confirmation(
    client: &RpcClient,
    transaction: &VersionedTransaction,
    signature: Signature,
) -> crate::Result<Signature> {
    let recent_blockhash = if transaction.uses_durable_nonce() {
        let (recent_blockhash, ..) = client
            .get_latest_blockhash_with_commitment(CommitmentConfig::processed())
            .await
            .map_err(Box::new)?;
        recent_blockhash
    } else {
        *transaction.get_recent_blockhash()
    };

    loop {
        match client
            .get_signature_status(&signature)
            .await
            .map_err(Box::new)?
        {
            Some(Ok(_)) => return Ok(signature),
            Some(Err(err)) => return Err(Box::new(SolanaClientError::from(err)).into()),
            None => {
                if !client
                    .is_blockhash_valid(&recent_blockhash, CommitmentConfig::processed())
                    .await
                    .map_err(Box::new)?
                {
                    return Err(crate::Error::BlockhashExpired);
                }
                sleep(POLL_INTERVAL).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};
    use solana_client::{
        client_error::Result as ClientResult,
        rpc_client::RpcClientConfig,
        rpc_request::{RpcError, RpcRequest},
        rpc_sender::{RpcSender, RpcTransportStats},
    };
    use solana_sdk::{
        hash::Hash,
        signature::Keypair,
        signer::Signer,
        transaction::{Transaction, TransactionError},
    };

    use super::*;

    /// Answers every request from a fixed script and records what was asked.
    #[derive(Clone)]
    struct ScriptedSender {
        signature: Signature,
        status: Value,
        blockhash_valid: bool,
        requests: Arc<Mutex<Vec<RpcRequest>>>,
    }

    impl ScriptedSender {
        fn count(&self, request: RpcRequest) -> usize {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| **r == request)
                .count()
        }
    }

    #[async_trait::async_trait]
    impl RpcSender for ScriptedSender {
        async fn send(&self, request: RpcRequest, _params: Value) -> ClientResult<Value> {
            self.requests.lock().unwrap().push(request);
            let context = json!({ "slot": 1 });
            match request {
                RpcRequest::SendTransaction => Ok(json!(self.signature.to_string())),
                RpcRequest::GetSignatureStatuses => {
                    Ok(json!({ "context": context, "value": [self.status.clone()] }))
                }
                RpcRequest::IsBlockhashValid => {
                    Ok(json!({ "context": context, "value": self.blockhash_valid }))
                }
                other => Err(RpcError::RpcRequestError(format!("unexpected {other:?}")).into()),
            }
        }

        fn get_transport_stats(&self) -> RpcTransportStats {
            RpcTransportStats::default()
        }

        fn url(&self) -> String {
            "scripted".to_string()
        }
    }

    fn setup(
        status: Value,
        blockhash_valid: bool,
    ) -> (RpcClient, ScriptedSender, VersionedTransaction) {
        let payer = Keypair::new();
        let tx = Transaction::new_signed_with_payer(
            &[],
            Some(&payer.pubkey()),
            &[&payer],
            Hash::new_unique(),
        );
        let sender = ScriptedSender {
            signature: tx.signatures[0],
            status,
            blockhash_valid,
            requests: Default::default(),
        };
        let client = RpcClient::new_sender(
            sender.clone(),
            RpcClientConfig::with_commitment(CommitmentConfig::confirmed()),
        );
        (client, sender, tx.into())
    }

    fn status(status: Value) -> Value {
        json!({
            "slot": 1,
            "confirmations": null,
            "status": status,
            "err": null,
            "confirmationStatus": "confirmed",
        })
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_status_returns_signature() -> crate::Result<()> {
        let (client, sender, tx) = setup(status(json!({ "Ok": null })), true);
        let signature = client
            .send_and_confirm_with_timeout(&tx, Default::default(), Duration::from_secs(60))
            .await?;
        assert_eq!(signature, tx.signatures[0]);
        assert_eq!(sender.count(RpcRequest::SendTransaction), 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn pending_status_times_out() {
        let (client, sender, tx) = setup(Value::Null, true);
        let confirm_timeout = Duration::from_secs(3);
        let res = client
            .send_and_confirm_with_timeout(&tx, Default::default(), confirm_timeout)
            .await;
        assert!(matches!(res, Err(crate::Error::ConfirmationTimeout(d)) if d == confirm_timeout));
        assert_eq!(sender.count(RpcRequest::SendTransaction), 1);
        // One poll right away, then one every 500ms.
        assert!(sender.count(RpcRequest::GetSignatureStatuses) >= 6);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_blockhash_fails() {
        let (client, sender, tx) = setup(Value::Null, false);
        let res = client
            .send_and_confirm_with_timeout(&tx, Default::default(), Duration::from_secs(60))
            .await;
        assert!(matches!(res, Err(crate::Error::BlockhashExpired)));
        assert_eq!(sender.count(RpcRequest::SendTransaction), 1);
        assert_eq!(sender.count(RpcRequest::GetSignatureStatuses), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_status_is_client_error() {
        let (client, sender, tx) = setup(status(json!({ "Err": "AccountInUse" })), true);
        let res = client
            .send_and_confirm_with_timeout(&tx, Default::default(), Duration::from_secs(60))
            .await;
        match res {
            Err(crate::Error::Client(err)) => {
                assert_eq!(err.get_transaction_error(), Some(TransactionError::AccountInUse));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(sender.count(RpcRequest::SendTransaction), 1);
    }
}
