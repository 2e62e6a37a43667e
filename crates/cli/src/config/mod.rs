/// Output format.
pub mod output;

use std::time::Duration;

use ordermgr_sdk::{
    programs::anchor_lang::prelude::Pubkey,
    serde::StringPubkey,
    solana_utils::{
        cluster::Cluster,
        config::DEFAULT_CONFIRM_TIMEOUT,
        signer::SignerRef,
        solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel},
    },
    ClientOptions,
};
use serde_with::{serde_as, skip_serializing_none, DisplayFromStr};

use crate::wallet::signer_from_source;

const DEFAULT_WALLET: &str = "~/.config/solana/id.json";

/// Configuration.
///
/// Flags override `ORDERMGR_*` environment variables, which override the
/// config file. Keys set nowhere use their defaults.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Default, Clone, clap::Args, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the admin keypair file.
    #[arg(long, short)]
    wallet: Option<String>,
    /// Cluster to connect to.
    #[arg(long = "url", short = 'u')]
    cluster: Option<Cluster>,
    /// Commitment level.
    #[arg(long)]
    commitment: Option<CommitmentLevel>,
    /// Program ID of the order manager.
    #[arg(long)]
    program: Option<StringPubkey>,
    /// How long to wait for a transaction to be confirmed, e.g. `60s`.
    #[arg(long)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    confirm_timeout: Option<humantime::Duration>,
}

impl Config {
    /// Config with every key set to its default.
    pub fn with_defaults() -> Self {
        Self {
            wallet: Some(DEFAULT_WALLET.to_string()),
            cluster: Some(Cluster::default()),
            commitment: Some(CommitmentLevel::Confirmed),
            program: Some(ordermgr_sdk::programs::ID.into()),
            confirm_timeout: Some(DEFAULT_CONFIRM_TIMEOUT.into()),
        }
    }

    /// Path of the admin keypair.
    pub fn wallet_path(&self) -> &str {
        self.wallet.as_deref().unwrap_or(DEFAULT_WALLET)
    }

    /// Creates a wallet based on the config.
    pub fn wallet(&self) -> ordermgr_sdk::Result<SignerRef> {
        signer_from_source(self.wallet_path())
    }

    /// Returns the cluster.
    pub fn cluster(&self) -> Cluster {
        self.cluster.clone().unwrap_or_default()
    }

    /// Returns the commitment config.
    pub fn commitment_config(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.commitment.unwrap_or(CommitmentLevel::Confirmed),
        }
    }

    /// Returns the program ID of the order manager.
    pub fn program_id(&self) -> &Pubkey {
        self.program
            .as_deref()
            .unwrap_or(&ordermgr_sdk::programs::ID)
    }

    /// Returns the confirmation timeout.
    pub fn confirm_timeout(&self) -> Duration {
        self.confirm_timeout
            .map(Into::into)
            .unwrap_or(DEFAULT_CONFIRM_TIMEOUT)
    }

    /// Returns the client options.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::builder()
            .program_id(Some(*self.program_id()))
            .commitment(self.commitment_config())
            .confirm_timeout(self.confirm_timeout())
            .build()
    }
}
