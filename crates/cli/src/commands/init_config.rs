use tokio::fs;

use crate::config::Config;

/// Write a config file filled with the defaults.
#[derive(Debug, clap::Args)]
pub struct InitConfig {
    /// Replace if the config file already exists.
    #[arg(long, short)]
    force: bool,
}

impl super::Command for InitConfig {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let path = ctx.config_path();
        if !self.force && fs::try_exists(path).await? {
            eyre::bail!(
                "{} already exists, use `--force` to overwrite it",
                path.display()
            );
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content = toml::to_string_pretty(&Config::with_defaults())?;
        fs::write(path, content).await?;
        tracing::info!(path = %path.display(), "config file written");
        println!("{}", path.display());
        Ok(())
    }
}
