//! `reactrender config` — create and inspect the config file.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use reactrender_core::config::{self, ReactRenderConfig};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default config to ~/.reactrender/config.yaml.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config as YAML.
    Show,
}

pub fn run(command: ConfigCommand) -> Result<()> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    match command {
        ConfigCommand::Init { force } => {
            let path = config::config_path_at(&home);
            if path.exists() && !force {
                bail!(
                    "config already exists at {}; pass --force to overwrite",
                    path.display()
                );
            }
            let written = config::save_at(&home, &ReactRenderConfig::default())
                .context("failed to write config")?;
            println!("✓ wrote {}", written.display());
        }
        ConfigCommand::Show => {
            let cfg = config::load_at(&home).context("failed to load config")?;
            let yaml = serde_yaml::to_string(&cfg).context("failed to serialize config")?;
            println!("# {}", config::config_path_at(&home).display());
            print!("{yaml}");
        }
    }
    Ok(())
}
