use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status::{account_stats, apply_effective_statuses, reconcile};
use crate::errors::AppResult;
use crate::host::{NativeHost, SystemHost};
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

/// Handle the `stats` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { live, json } = cmd {
        let store = open_store(cfg)?;

        // With --live the stored statuses are refreshed first.
        let running = if *live {
            let views = reconcile(&store.accounts()?, &SystemHost::new().list_processes()?);
            apply_effective_statuses(&store, &views)?;
            Some(account_stats(&views).running)
        } else {
            None
        };

        let stats = store.stats()?;
        if *json {
            return print_json(&stats);
        }

        println!("{}📊 Accounts{}", CYAN, RESET);
        println!("  Total   : {}", stats.total_accounts);
        println!(
            "  Live    : {}{}{} ({}%)",
            GREEN, stats.live_accounts, RESET, stats.live_percent
        );
        println!("  Blocked : {}{}{}", RED, stats.blocked_accounts, RESET);
        if let Some(n) = running {
            println!("  Running : {}{}{}", YELLOW, n, RESET);
        }
    }
    Ok(())
}
