use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{AccountAction, Commands};
use crate::config::Config;
use crate::core::helpers::{account_hashtags, normalize_hashtag};
use crate::core::scan::scan_accounts;
use crate::core::status::{AccountView, reconcile};
use crate::errors::{AppError, AppResult};
use crate::host::{NativeHost, SystemHost};
use crate::models::account::Account;
use crate::store::Store;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{colorize_optional, colorize_status};
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;
use crate::utils::time::format_ms;

/// Explicit scope, else the configured profile folder.
fn meta_scope(store: &Store, scope: &Option<String>) -> AppResult<Option<String>> {
    if let Some(s) = scope {
        return Ok(Some(s.clone()));
    }
    let folder = store.settings()?.telegram_folder_path;
    Ok(Some(folder).filter(|f| !f.trim().is_empty()))
}

fn tag_list(account: &Account) -> String {
    account_hashtags(account)
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn views_without_processes(accounts: Vec<Account>) -> Vec<AccountView> {
    accounts
        .into_iter()
        .map(|account| AccountView {
            effective_status: account.status,
            account,
            pid: None,
        })
        .collect()
}

fn print_accounts(views: &[AccountView], live: bool) {
    let mut table = Table::new(&["ID", "Name", "Status", "PID", "Tags", "Last active", "Notes"]);
    for v in views {
        let a = &v.account;
        table.add_row(vec![
            a.id.to_string(),
            a.label().to_string(),
            colorize_status(v.effective_status),
            if live {
                v.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".into())
            } else {
                "-".into()
            },
            colorize_optional(&tag_list(a)),
            a.last_active.map(format_ms).unwrap_or_else(|| "-".into()),
            colorize_optional(a.notes.as_deref().unwrap_or("")),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Account { action } = cmd else {
        return Ok(());
    };
    let store = open_store(cfg)?;

    match action {
        AccountAction::Add { name, status } => {
            let account = store.add_account(name, *status)?;
            success(format!(
                "Account #{} '{}' added ({})",
                account.id, account.name, account.status
            ));
        }

        AccountAction::List {
            status,
            tag,
            live,
            json,
        } => {
            let accounts = store.accounts()?;
            let mut views = if *live {
                let host = SystemHost::new();
                reconcile(&accounts, &host.list_processes()?)
            } else {
                views_without_processes(accounts)
            };

            if let Some(s) = status {
                views.retain(|v| v.effective_status == *s);
            }
            if let Some(t) = tag.as_deref().map(normalize_hashtag).filter(|t| !t.is_empty()) {
                views.retain(|v| account_hashtags(&v.account).contains(&t));
            }

            if *json {
                return print_json(&views);
            }
            if views.is_empty() {
                info("No accounts match (tgfarm account scan, or tgfarm account add <name>).");
                return Ok(());
            }
            print_accounts(&views, *live);
        }

        AccountAction::Status { id, status } => {
            let account = store.update_account_status(*id, *status)?;
            success(format!("Account #{} is now {}", account.id, account.status));
        }

        AccountAction::Notes { id, text, scope } => {
            let scope = meta_scope(&store, scope)?;
            store.update_account_notes(*id, text, scope.as_deref())?;
            success(format!("Notes of account #{} updated", id));
        }

        AccountAction::Rename {
            id,
            display_name,
            scope,
        } => {
            let scope = meta_scope(&store, scope)?;
            let account = store.update_account_display_name(*id, display_name, scope.as_deref())?;
            success(format!("Account #{} is now shown as '{}'", id, account.label()));
        }

        AccountAction::Tags { id, tags, scope } => {
            let scope = meta_scope(&store, scope)?;
            let account = store.set_account_hashtags(*id, tags, scope.as_deref())?;
            if account.hashtags.is_empty() {
                success(format!("Hashtags of account #{} cleared", id));
            } else {
                success(format!("Account #{} tagged: {}", id, tag_list(&account)));
            }
        }

        AccountAction::Del { id } => {
            if !store.delete_account(*id)? {
                return Err(AppError::NotFound(format!("Account #{}", id)));
            }
            store.add_log(&format!("Deleted account #{}", id))?;
            success(format!("Account #{} deleted", id));
        }

        AccountAction::Scan { folder } => {
            let folder = match folder {
                Some(f) => expand_tilde(f).to_string_lossy().to_string(),
                None => store.settings()?.telegram_folder_path,
            };
            if folder.trim().is_empty() {
                return Err(AppError::Validation(
                    "no folder given and telegramFolderPath is not set".into(),
                ));
            }
            let report = scan_accounts(&store, &SystemHost::new(), &folder)?;
            success(format!(
                "Scanned {}: {} new, {} updated, {} total",
                folder, report.added, report.updated, report.total
            ));
            if report.conflicts > 0 {
                warning(format!(
                    "{} folder(s) skipped: their ids belong to accounts added by hand",
                    report.conflicts
                ));
            }
        }
    }

    Ok(())
}
