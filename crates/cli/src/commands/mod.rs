use std::{ops::Deref, path::Path};

use enum_dispatch::enum_dispatch;
use eyre::OptionExt;
use ordermgr_sdk::{solana_utils::signer::SignerRef, Client};

use crate::config::Config;

use configuration::{AdminPubkey, ShowConfig};
use init_config::InitConfig;
use order::{ListOrders, ShowOrder};
use pda::Pda;
use set_state::SetState;

mod configuration;
mod init_config;
mod order;
mod pda;
mod set_state;

/// Commands.
#[enum_dispatch]
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Initialize config file.
    InitConfig(InitConfig),
    /// Print the admin pubkey.
    Pubkey(AdminPubkey),
    /// Derive program addresses.
    Pda(Pda),
    /// List all orders.
    Orders(ListOrders),
    /// Show the order of a trade.
    Order(ShowOrder),
    /// Show the on-chain config.
    Config(ShowConfig),
    /// Set the status of an order.
    SetState(SetState),
}

#[enum_dispatch(Commands)]
pub(crate) trait Command {
    fn is_client_required(&self) -> bool {
        false
    }

    async fn execute(&self, ctx: Context<'_>) -> eyre::Result<()>;
}

/// Client used by commands.
pub struct CommandClient(Client<SignerRef>);

impl CommandClient {
    /// Load the admin wallet and connect.
    pub fn new(config: &Config) -> eyre::Result<Self> {
        let wallet = config.wallet()?;
        let client = Client::new_with_options(config.cluster(), wallet, config.client_options())?;
        Ok(Self(client))
    }
}

impl Deref for CommandClient {
    type Target = Client<SignerRef>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Execution context.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    config: &'a Config,
    config_path: &'a Path,
    client: Option<&'a CommandClient>,
}

impl<'a> Context<'a> {
    pub(super) fn new(
        config: &'a Config,
        config_path: &'a Path,
        client: Option<&'a CommandClient>,
    ) -> Self {
        Self {
            config,
            config_path,
            client,
        }
    }

    /// Get the resolved config.
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Get the config file path.
    pub fn config_path(&self) -> &'a Path {
        self.config_path
    }

    /// Get the client.
    pub fn client(&self) -> eyre::Result<&'a CommandClient> {
        self.client.ok_or_eyre("client is not provided")
    }
}
