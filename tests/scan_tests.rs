mod common;

use common::FakeHost;
use tgfarm::core::helpers::stable_account_id;
use tgfarm::core::scan::{scan_accounts, scanned_account_id};
use tgfarm::host::build_telegram_link;
use tgfarm::host::DirEntry;
use tgfarm::models::account::AccountStatus;
use tgfarm::models::launch::LaunchParams;
use tgfarm::store::Store;

#[test]
fn scanned_ids_prefer_profile_numbers() {
    assert_eq!(scanned_account_id("TG 14", "/farm/TG 14"), 14);
    assert_eq!(
        scanned_account_id("Personal", "/farm/Personal"),
        stable_account_id("/farm/Personal")
    );
}

#[test]
fn scan_creates_accounts_with_system_notes() {
    let store = Store::in_memory().unwrap();
    let host = FakeHost::with_dirs(&["TG 1", "TG 2"]);
    host.dirs.borrow_mut().push(DirEntry {
        name: "readme.txt".into(),
        path: "/farm/readme.txt".into(),
        is_dir: false,
    });

    let report = scan_accounts(&store, &host, "/farm").unwrap();
    assert_eq!((report.added, report.updated, report.total), (2, 0, 2));

    let accounts = store.accounts().unwrap();
    assert_eq!(accounts[0].id, 1);
    assert_eq!(accounts[0].notes.as_deref(), Some("/farm/TG 1 (TG 1) - active"));
    assert!(store.logs().unwrap()[0].message.starts_with("Scanned /farm"));
}

#[test]
fn rescan_keeps_user_edits() {
    let store = Store::in_memory().unwrap();
    let host = FakeHost::with_dirs(&["TG 1", "TG 2"]);
    scan_accounts(&store, &host, "/farm").unwrap();

    store.update_account_notes(1, "main wallet", Some("/farm")).unwrap();
    store
        .set_account_hashtags(1, &["#vip".into()], Some("/farm"))
        .unwrap();
    store.update_account_status(2, AccountStatus::Blocked).unwrap();

    // Losing the account list must not lose the scoped edits.
    store.save_accounts(&[]).unwrap();
    let report = scan_accounts(&store, &host, "/farm").unwrap();
    assert_eq!(report.added, 2);

    let accounts = store.accounts().unwrap();
    assert_eq!(accounts[0].notes.as_deref(), Some("main wallet"));
    assert_eq!(accounts[0].hashtags, vec!["vip"]);
    assert_eq!(accounts[1].notes.as_deref(), Some("/farm/TG 2 (TG 2) - active"));

    let again = scan_accounts(&store, &host, "/farm").unwrap();
    assert_eq!((again.added, again.updated), (0, 2));
}

#[test]
fn telegram_links() {
    let mut params = LaunchParams {
        app_name: "@blum".into(),
        ..LaunchParams::default()
    };
    assert_eq!(build_telegram_link(&params).as_deref(), Some("https://t.me/blum"));

    params.app_type = "app".into();
    params.ref_link = "ref_42".into();
    assert_eq!(
        build_telegram_link(&params).as_deref(),
        Some("https://t.me/blum/app?startapp=ref_42")
    );

    params.ref_link = "https://t.me/other?start=1".into();
    assert_eq!(
        build_telegram_link(&params).as_deref(),
        Some("https://t.me/other?start=1")
    );

    assert_eq!(build_telegram_link(&LaunchParams::default()), None);
}

#[test]
fn scan_leaves_hand_added_accounts_alone() {
    let store = Store::in_memory().unwrap();
    let personal = store.add_account("Personal", None).unwrap();
    assert_eq!(personal.id, 1);
    store
        .update_account_notes(1, "my main account, do not touch", None)
        .unwrap();
    let host = FakeHost::with_dirs(&["TG 1", "TG 2"]);

    let report = scan_accounts(&store, &host, "/farm").unwrap();
    assert_eq!(
        (report.added, report.updated, report.conflicts, report.total),
        (1, 0, 1, 2)
    );

    let kept = store.account(1).unwrap();
    assert_eq!(kept.name, "Personal");
    assert_eq!(kept.notes.as_deref(), Some("my main account, do not touch"));
    assert_eq!(store.account(2).unwrap().name, "TG 2");
    assert!(store.logs().unwrap()[0].message.ends_with("1 skipped"));
}

#[test]
fn scan_adopts_accounts_named_after_the_folder() {
    let store = Store::in_memory().unwrap();
    store.add_account("TG1", None).unwrap();
    let host = FakeHost::with_dirs(&["TG 1"]);

    let report = scan_accounts(&store, &host, "/farm").unwrap();
    assert_eq!((report.added, report.updated, report.conflicts), (0, 1, 0));
    assert_eq!(store.account(1).unwrap().name, "TG 1");
}
