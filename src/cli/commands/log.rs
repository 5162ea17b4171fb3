use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

/// Handle the `logs` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Logs { limit, full } = cmd {
        let store = open_store(cfg)?;
        LogLogic::print_log(&store, *limit, *full)?;
    }
    Ok(())
}
