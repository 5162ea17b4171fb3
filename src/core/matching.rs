//! Heuristics that tie a running client process to a stored account.

use crate::core::helpers::{account_path, extract_profile_number, normalize_path, normalize_text};
use crate::models::account::Account;
use crate::models::process::TelegramProcess;
use regex::RegexBuilder;
use std::collections::HashSet;

/// Profile numbers decide when both sides carry one; otherwise the process
/// must live under the account folder, or mention the account name as a
/// separate token.
pub fn process_belongs_to_account(account: &Account, process: &TelegramProcess) -> bool {
    let account_name = normalize_text(&account.name);
    let account_dir = account_path(account);
    let process_path = normalize_path(&process.path);
    let process_name = normalize_text(&process.name);

    let account_profile =
        extract_profile_number(&account_name).or_else(|| extract_profile_number(&account_dir));
    let process_profile =
        extract_profile_number(&process_path).or_else(|| extract_profile_number(&process_name));

    if let (Some(a), Some(p)) = (account_profile, process_profile) {
        return a == p;
    }

    if !account_dir.is_empty()
        && !process_path.is_empty()
        && (process_path == account_dir || process_path.starts_with(&format!("{account_dir}/")))
    {
        return true;
    }

    if account_name.is_empty() {
        return false;
    }

    let pattern = format!(
        "(^|[^a-z0-9]){}([^a-z0-9]|$)",
        regex::escape(&account_name)
    );
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(&process_path) || re.is_match(&process_name),
        Err(_) => false,
    }
}

/// First matching process whose pid has not been claimed yet.
pub fn find_pid_for_account(
    account: &Account,
    processes: &[TelegramProcess],
    used: &HashSet<u32>,
) -> Option<u32> {
    processes
        .iter()
        .filter(|p| !used.contains(&p.pid))
        .find(|p| process_belongs_to_account(account, p))
        .map(|p| p.pid)
}
