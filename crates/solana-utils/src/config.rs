use std::{ops::Deref, time::Duration};

use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signer::Signer};

#[cfg(client)]
use solana_client::nonblocking::rpc_client::RpcClient;

use crate::cluster::Cluster;

/// Default time to wait for a transaction to be confirmed.
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

/// Wallet Config.
#[derive(Clone)]
pub struct Config<C> {
    cluster: Cluster,
    payer: C,
    options: CommitmentConfig,
    confirm_timeout: Duration,
}

impl<C> Config<C> {
    /// Create a new wallet config.
    pub fn new(cluster: Cluster, payer: C, options: CommitmentConfig) -> Self {
        Self {
            cluster,
            payer,
            options,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
        }
    }

    /// Get cluster.
    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    /// Get commitment config.
    pub fn commitment(&self) -> &CommitmentConfig {
        &self.options
    }

    /// Get the time to wait for confirmation.
    pub fn confirm_timeout(&self) -> Duration {
        self.confirm_timeout
    }

    /// Get the payer.
    pub fn payer_ref(&self) -> &C {
        &self.payer
    }

    /// Create a Solana RPC Client.
    #[cfg(client)]
    pub fn rpc(&self) -> RpcClient {
        self.cluster.rpc(self.options)
    }

    /// Set the time to wait for confirmation.
    pub fn set_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }
}

impl<C: Deref<Target = impl Signer>> Config<C> {
    /// Get payer pubkey.
    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }
}
