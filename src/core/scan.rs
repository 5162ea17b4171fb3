//! Build the account list from the profile folders on disk.

use crate::core::helpers::{
    extract_profile_number, has_user_notes, normalize_hashtags, stable_account_id, system_note,
};
use crate::errors::AppResult;
use crate::host::NativeHost;
use crate::models::account::Account;
use crate::store::Store;
use crate::ui::messages::warning;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub added: usize,
    pub updated: usize,
    /// Folders whose id is held by an account added by hand.
    pub conflicts: usize,
    pub total: usize,
}

/// Id for a scanned folder: its profile number, else a hash of the path.
pub fn scanned_account_id(name: &str, path: &str) -> i64 {
    extract_profile_number(name)
        .map(i64::from)
        .unwrap_or_else(|| stable_account_id(path))
}

/// An existing account is the folder's own only if it carries the folder
/// name or the same profile number.
fn belongs_to_folder(account: &Account, folder_name: &str, id: i64) -> bool {
    account.name == folder_name || extract_profile_number(&account.name).map(i64::from) == Some(id)
}

/// One account per sub-directory of `folder`. User notes, display names and
/// hashtags survive through the account meta scoped by `folder`; accounts
/// without user notes get a generated `<path> (<name>) - <status>` note.
pub fn scan_accounts<H: NativeHost>(store: &Store, host: &H, folder: &str) -> AppResult<ScanReport> {
    let entries = host.read_directory(folder)?;
    let mut accounts = store.accounts()?;
    let meta = store.account_meta_map(folder)?;
    let mut report = ScanReport::default();

    for entry in entries.iter().filter(|e| e.is_dir) {
        let id = scanned_account_id(&entry.name, &entry.path);
        let overlay = meta.get(&id);

        let index = match accounts.iter().position(|a| a.id == id) {
            Some(i) if belongs_to_folder(&accounts[i], &entry.name, id) => {
                report.updated += 1;
                i
            }
            Some(i) => {
                warning(format!(
                    "{} skipped: id {} is taken by account '{}'",
                    entry.name, id, accounts[i].name
                ));
                report.conflicts += 1;
                continue;
            }
            None => {
                accounts.push(Account::new(id, entry.name.clone()));
                report.added += 1;
                accounts.len() - 1
            }
        };
        let account = &mut accounts[index];
        account.name = entry.name.clone();

        if let Some(m) = overlay {
            if account.display_name.is_none() {
                account.display_name = m.display_name.clone();
            }
            if account.hashtags.is_empty()
                && let Some(tags) = &m.hashtags
            {
                account.hashtags = normalize_hashtags(tags.iter().map(String::as_str));
            }
            if !has_user_notes(account)
                && let Some(n) = m.notes.as_deref().filter(|n| !n.trim().is_empty())
            {
                account.notes = Some(n.to_string());
            }
        }

        if !has_user_notes(account) {
            account.notes = Some(system_note(&entry.path, &entry.name, account.status));
        }
    }

    report.total = accounts.len();
    store.save_accounts(&accounts)?;
    store.sync_account_meta(folder, &accounts)?;
    store.add_log(&format!(
        "Scanned {}: {} new, {} updated, {} skipped",
        folder, report.added, report.updated, report.conflicts
    ))?;
    Ok(report)
}
