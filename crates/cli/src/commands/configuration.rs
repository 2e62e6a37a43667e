use eyre::OptionExt;

use crate::config::output::OutputFormat;

/// Print the pubkey of the loaded admin wallet.
#[derive(Debug, clap::Args)]
pub struct AdminPubkey {}

impl super::Command for AdminPubkey {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        println!("{}", ctx.client()?.payer());
        Ok(())
    }
}

/// Show the on-chain config.
#[derive(Debug, clap::Args)]
pub struct ShowConfig {
    /// Output format.
    #[arg(long, short, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(serde::Serialize)]
struct ConfigOutput {
    admin: String,
    bump: u8,
}

impl super::Command for ShowConfig {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let address = client.find_config_address();
        let config = client
            .fetch_config()
            .await?
            .ok_or_eyre("the program is not initialized")?;
        if config.admin != client.payer() {
            tracing::warn!(
                admin = %config.admin,
                wallet = %client.payer(),
                "the loaded wallet is not the registered admin"
            );
        }
        let output = ConfigOutput {
            admin: config.admin.to_string(),
            bump: config.bump,
        };
        println!("{}", self.format.display_keyed_account(&address, output)?);
        Ok(())
    }
}
