//! tgfarm library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (store, core logic, native host).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod host;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Project { .. } => commands::project::handle(&cli.command, cfg),
        Commands::Account { .. } => commands::account::handle(&cli.command, cfg),
        Commands::Task { .. } => commands::task::handle(&cli.command, cfg),
        Commands::Logs { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Settings { .. } => commands::settings::handle(&cli.command, cfg),
        Commands::Hashtag { .. } => commands::hashtag::handle(&cli.command, cfg),
        Commands::Auth { .. } => commands::auth::handle(&cli.command, cfg),
        Commands::Launch { .. } => commands::launch::handle(&cli.command, cfg),
        Commands::Processes { .. } => commands::processes::handle(&cli.command, cfg),
        Commands::Stats { .. } => commands::stats::handle(&cli.command, cfg),
        Commands::Watch { .. } => commands::watch::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    ui::messages::set_quiet(cli.quiet);

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line database override
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
