pub mod handlers;
pub mod models;

use crate::handlers::{admin, query};
use crate::models::args::{Cli, Command};
use anyhow::{Context, Result};
use clap::Parser;
use toggle::Toggles;
use toggle::domain::config::Config;
use toggle::kernel::config::load_config;
use toggle::kernel::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: Config =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _logger = init_logging(env!("CARGO_BIN_NAME"), &config.log)?;

    let toggles = Toggles::open(&config.store)?;
    let catalog = toggles.catalog();

    match cli.command {
        Command::Groups => admin::list_groups(catalog)?,
        Command::AddGroup { name } => admin::add_group(catalog, &name)?,
        Command::Features { group } => admin::list_features(catalog, &group)?,
        Command::Get { group, name } => admin::get_feature(catalog, &group, &name)?,
        Command::Add { group, name, description, enabled, gating } => {
            admin::add_feature(catalog, group, name, description, enabled, gating)?;
        },
        Command::Import { file } => admin::import(catalog, &file)?,
        Command::Update { group, name, rename, description, enabled, gating, clear_user_groups } => {
            let patch = admin::patch(rename, description, enabled, gating, clear_user_groups)?;
            admin::update_feature(catalog, &group, &name, patch)?;
        },
        Command::Remove { group, name } => admin::remove_feature(catalog, &group, &name)?,
        Command::Active { group, name, requester, explain } => {
            query::active(&toggles, &group, &name, &requester, explain)?;
        },
        Command::States { group, requester } => {
            query::states(&toggles, group.as_deref(), &requester)?;
        },
    }

    Ok(())
}
