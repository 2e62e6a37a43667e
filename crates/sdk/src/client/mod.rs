/// The ledger seam.
pub mod ledger;

/// Per-trade locks.
pub mod locks;

/// Operations.
pub mod ops;

/// In-memory ledger.
#[cfg(any(test, feature = "mock"))]
pub mod mock;

use std::{ops::Deref, time::Duration};

use ordermgr_programs::{anchor_lang::AccountDeserialize, ConfigState};
use ordermgr_solana_utils::{
    cluster::Cluster,
    config::{Config, DEFAULT_CONFIRM_TIMEOUT},
    program::Program,
    transaction_builder::TransactionBuilder,
    utils::WithSlot,
};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signer::Signer};
use typed_builder::TypedBuilder;

use crate::TradeId;

pub use self::{
    ledger::{Ledger, RpcLedger},
    locks::{TradeGuard, TradeLocks},
};

/// Options for [`Client`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientOptions {
    /// Program to bind to, the deployed order-manager program by default.
    #[builder(default)]
    program_id: Option<Pubkey>,
    #[builder(default = CommitmentConfig::confirmed())]
    commitment: CommitmentConfig,
    #[builder(default = DEFAULT_CONFIRM_TIMEOUT)]
    confirm_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Client for the order-manager program.
///
/// Holds the admin signer, the program binding and the ledger connection.
/// Construct it once and share it by reference.
pub struct Client<C, L = RpcLedger> {
    cfg: Config<C>,
    program: Program<C>,
    ledger: L,
    trade_locks: TradeLocks,
}

impl<C: Clone + Deref<Target = impl Signer>> Client<C> {
    /// Create a new [`Client`] talking to the cluster over RPC.
    pub fn new_with_options(
        cluster: Cluster,
        payer: C,
        options: ClientOptions,
    ) -> crate::Result<Self> {
        let cfg = Self::config(cluster, payer, &options);
        let ledger = RpcLedger::new(cfg.rpc(), cfg.confirm_timeout());
        Ok(Self::from_parts(cfg, options.program_id, ledger))
    }

    /// Create a new [`Client`] with default options.
    pub fn new(cluster: Cluster, payer: C) -> crate::Result<Self> {
        Self::new_with_options(cluster, payer, ClientOptions::default())
    }
}

impl<C: Clone + Deref<Target = impl Signer>, L: Ledger> Client<C, L> {
    /// Create a new [`Client`] on top of the given [`Ledger`].
    pub fn new_with_ledger(cluster: Cluster, payer: C, options: ClientOptions, ledger: L) -> Self {
        let cfg = Self::config(cluster, payer, &options);
        Self::from_parts(cfg, options.program_id, ledger)
    }

    fn config(cluster: Cluster, payer: C, options: &ClientOptions) -> Config<C> {
        Config::new(cluster, payer, options.commitment).set_confirm_timeout(options.confirm_timeout)
    }

    fn from_parts(cfg: Config<C>, program_id: Option<Pubkey>, ledger: L) -> Self {
        let program = Program::new(program_id.unwrap_or(ordermgr_programs::ID), cfg.clone());
        tracing::info!(
            program_id = %program.id(),
            admin = %cfg.payer(),
            cluster = %cfg.cluster(),
            "order manager client loaded"
        );
        Self {
            cfg,
            program,
            ledger,
            trade_locks: TradeLocks::default(),
        }
    }

    /// Get current cluster.
    pub fn cluster(&self) -> &Cluster {
        self.cfg.cluster()
    }

    /// Get current commitment config.
    pub fn commitment(&self) -> CommitmentConfig {
        *self.cfg.commitment()
    }

    /// Get the confirmation timeout.
    pub fn confirm_timeout(&self) -> Duration {
        self.cfg.confirm_timeout()
    }

    /// Get the admin pubkey.
    pub fn payer(&self) -> Pubkey {
        self.cfg.payer()
    }

    /// Get the program binding.
    pub fn program(&self) -> &Program<C> {
        &self.program
    }

    /// Get the program id.
    pub fn program_id(&self) -> &Pubkey {
        self.program.id()
    }

    /// Get the ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Get the per-trade locks.
    pub fn trade_locks(&self) -> &TradeLocks {
        &self.trade_locks
    }

    /// Create a [`TransactionBuilder`] for the program.
    pub fn transaction(&self) -> TransactionBuilder<C> {
        self.program.transaction()
    }

    /// Find PDA for the [`ConfigState`] account.
    pub fn find_config_address(&self) -> Pubkey {
        crate::pda::find_config_address(self.program_id()).0
    }

    /// Find PDA for the order account of the trade.
    pub fn find_order_address(&self, trade_id: &TradeId) -> Pubkey {
        crate::pda::find_order_address(trade_id, self.program_id()).0
    }

    /// Fetch and decode an account owned by the program.
    ///
    /// The value inside the context will be `None` if the account does not exist.
    pub async fn account_with_context<T: AccountDeserialize>(
        &self,
        address: &Pubkey,
    ) -> crate::Result<WithSlot<Option<T>>> {
        let res = self.ledger.account(address).await?;
        res.map(|account| {
            account
                .map(|account| {
                    if account.owner != *self.program_id() {
                        return Err(crate::Error::Decode(format!(
                            "account {address} is not owned by the program"
                        )));
                    }
                    Ok(T::try_deserialize(&mut account.data.as_slice())?)
                })
                .transpose()
        })
        .transpose()
    }

    /// Fetch and decode an account owned by the program.
    pub async fn account<T: AccountDeserialize>(
        &self,
        address: &Pubkey,
    ) -> crate::Result<Option<T>> {
        Ok(self.account_with_context(address).await?.into_value())
    }

    /// Fetch the config account, `None` if the program is not initialized.
    pub async fn fetch_config(&self) -> crate::Result<Option<ConfigState>> {
        self.account(&self.find_config_address()).await
    }
}
