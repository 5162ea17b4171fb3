mod common;

use common::FakeHost;
use std::time::Duration;
use tgfarm::core::status::{
    StatusPoller, account_stats, apply_effective_statuses, effective_status, reconcile,
};
use tgfarm::models::account::{Account, AccountStatus};
use tgfarm::models::process::TelegramProcess;
use tgfarm::store::Store;

#[test]
fn effective_status_rules() {
    use AccountStatus::*;
    assert_eq!(effective_status(Blocked, true), Blocked);
    assert_eq!(effective_status(Blocked, false), Blocked);
    assert_eq!(effective_status(Inactive, true), Active);
    assert_eq!(effective_status(Active, false), Inactive);
}

#[test]
fn a_pid_is_assigned_once_in_account_order() {
    let accounts = vec![Account::new(1, "TG 1"), Account::new(2, "tg1"), Account::new(3, "TG 2")];
    let processes = vec![TelegramProcess::new(50, "Telegram", "/farm/TG 1/Telegram")];

    let views = reconcile(&accounts, &processes);
    assert_eq!(views[0].pid, Some(50));
    assert_eq!(views[1].pid, None);
    assert_eq!(views[2].pid, None);
    assert_eq!(views[0].effective_status, AccountStatus::Active);
    assert_eq!(views[2].effective_status, AccountStatus::Inactive);

    let stats = account_stats(&views);
    assert_eq!((stats.total, stats.running, stats.active), (3, 1, 1));
}

#[test]
fn applying_views_keeps_blocked_and_stamps_running() {
    let store = Store::in_memory().unwrap();
    store.add_account("TG 1", Some(AccountStatus::Inactive)).unwrap();
    store.add_account("TG 2", Some(AccountStatus::Blocked)).unwrap();
    store.add_account("TG 3", None).unwrap();

    let processes = vec![
        TelegramProcess::new(10, "Telegram", "/farm/TG 1/Telegram"),
        TelegramProcess::new(11, "Telegram", "/farm/TG 2/Telegram"),
    ];
    let views = reconcile(&store.accounts().unwrap(), &processes);
    let changed = apply_effective_statuses(&store, &views).unwrap();
    assert_eq!(changed, 3);

    let accounts = store.accounts().unwrap();
    assert_eq!(accounts[0].status, AccountStatus::Active);
    assert!(accounts[0].last_active.is_some());
    assert_eq!(accounts[1].status, AccountStatus::Blocked);
    assert!(accounts[1].last_active.is_some());
    assert_eq!(accounts[2].status, AccountStatus::Inactive);
    assert!(accounts[2].last_active.is_none());
}

#[test]
fn poller_backs_off_and_recovers() {
    let mut poller = StatusPoller::new(Duration::from_secs(5), Duration::from_secs(30));
    assert_eq!(poller.next_delay(), Duration::from_secs(5));

    poller.record_failure();
    assert_eq!(poller.next_delay(), Duration::from_secs(10));
    poller.record_failure();
    poller.record_failure();
    assert_eq!(poller.next_delay(), Duration::from_secs(30));
    poller.record_failure();
    assert_eq!(poller.next_delay(), Duration::from_secs(30));
    assert_eq!(poller.failures(), 4);

    poller.record_success();
    assert_eq!(poller.next_delay(), Duration::from_secs(5));
    assert_eq!(poller.failures(), 0);
}

#[test]
fn backoff_saturates_with_huge_limits() {
    let mut poller = StatusPoller::new(Duration::from_secs(u64::MAX / 2 + 1), Duration::MAX);
    poller.record_failure();
    assert_eq!(poller.next_delay(), Duration::MAX);
    poller.record_failure();
    assert_eq!(poller.next_delay(), Duration::MAX);
    assert_eq!(poller.failures(), 2);
}

#[test]
fn poll_once_reports_host_errors() {
    let store = Store::in_memory().unwrap();
    store.add_account("TG 7", None).unwrap();
    let host = FakeHost::new();
    host.add_process(70, "Telegram", "/farm/TG 7/Telegram");

    let mut poller = StatusPoller::new(Duration::from_secs(1), Duration::from_secs(8));
    host.fail_processes.set(true);
    assert!(poller.poll_once(&store, &host).is_err());
    assert_eq!(poller.next_delay(), Duration::from_secs(2));

    host.fail_processes.set(false);
    let views = poller.poll_once(&store, &host).unwrap();
    assert_eq!(views[0].pid, Some(70));
    assert_eq!(poller.next_delay(), Duration::from_secs(1));
}
