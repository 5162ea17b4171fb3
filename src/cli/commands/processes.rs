use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status::reconcile;
use crate::errors::AppResult;
use crate::host::{NativeHost, SystemHost};
use crate::ui::messages::info;
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

/// Handle the `processes` command: running clients and the account each
/// one was matched to.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Processes { json } = cmd {
        let store = open_store(cfg)?;
        let processes = SystemHost::new().list_processes()?;

        if *json {
            return print_json(&processes);
        }
        if processes.is_empty() {
            info("No Telegram processes running.");
            return Ok(());
        }

        let views = reconcile(&store.accounts()?, &processes);
        let mut table = Table::new(&["PID", "Name", "Account", "Path"]);
        for p in &processes {
            let owner = views
                .iter()
                .find(|v| v.pid == Some(p.pid))
                .map(|v| format!("#{} {}", v.account.id, v.account.label()))
                .unwrap_or_default();
            table.add_row(vec![
                p.pid.to_string(),
                p.name.clone(),
                colorize_optional(&owner),
                p.path.clone(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
