use std::collections::HashSet;
use tgfarm::core::helpers::system_note;
use tgfarm::core::matching::{find_pid_for_account, process_belongs_to_account};
use tgfarm::models::account::{Account, AccountStatus};
use tgfarm::models::process::TelegramProcess;

fn scanned(id: i64, name: &str, path: &str) -> Account {
    let mut a = Account::new(id, name);
    a.notes = Some(system_note(path, name, AccountStatus::Active));
    a
}

#[test]
fn profile_numbers_decide_when_both_present() {
    let account = Account::new(3, "TG 3");
    let same = TelegramProcess::new(10, "Telegram", "/farm/TG 3/Telegram");
    let other = TelegramProcess::new(11, "Telegram", "/farm/TG 30/Telegram");
    assert!(process_belongs_to_account(&account, &same));
    assert!(!process_belongs_to_account(&account, &other));
}

#[test]
fn process_under_account_folder_matches() {
    let account = scanned(77, "Main", "D:\\Farm\\Main");
    let inside = TelegramProcess::new(1, "Telegram.exe", "d:/farm/main/Telegram.exe");
    let outside = TelegramProcess::new(2, "Telegram.exe", "d:/farm/mainline/Telegram.exe");
    assert!(process_belongs_to_account(&account, &inside));
    assert!(!process_belongs_to_account(&account, &outside));
}

#[test]
fn account_name_must_be_a_separate_token() {
    let account = Account::new(5, "alpha");
    let token = TelegramProcess::new(1, "Telegram", "/opt/clients/alpha-2/Telegram");
    let substring = TelegramProcess::new(2, "Telegram", "/opt/clients/alphabet/Telegram");
    assert!(process_belongs_to_account(&account, &token));
    assert!(!process_belongs_to_account(&account, &substring));
}

#[test]
fn empty_account_name_never_matches() {
    let account = Account::new(5, "");
    let p = TelegramProcess::new(1, "Telegram", "/anything");
    assert!(!process_belongs_to_account(&account, &p));
}

#[test]
fn claimed_pids_are_skipped() {
    let account = Account::new(1, "TG 1");
    let processes = vec![
        TelegramProcess::new(10, "Telegram", "/farm/TG 1/Telegram"),
        TelegramProcess::new(11, "Telegram", "/farm/TG 1/Telegram"),
    ];
    let mut used = HashSet::new();
    assert_eq!(find_pid_for_account(&account, &processes, &used), Some(10));
    used.insert(10);
    assert_eq!(find_pid_for_account(&account, &processes, &used), Some(11));
    used.insert(11);
    assert_eq!(find_pid_for_account(&account, &processes, &used), None);
}
