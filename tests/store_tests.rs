use tgfarm::db::kv;
use tgfarm::errors::AppError;
use tgfarm::models::account::AccountStatus;
use tgfarm::models::log_entry::LogEntry;
use tgfarm::models::project::{NewProject, ProjectPatch};
use tgfarm::models::task::RepeatRule;
use tgfarm::models::user::User;
use tgfarm::store::{Store, keys};
use tgfarm::utils::time::now_ms;

fn store() -> Store {
    Store::in_memory().expect("in-memory store")
}

// ---- projects ----

#[test]
fn project_names_are_unique_and_app_name_defaults() {
    let s = store();
    let p = s
        .add_project(NewProject {
            name: "  Blum ".into(),
            ref_link: "ref_abc".into(),
            ..NewProject::default()
        })
        .unwrap();
    assert_eq!(p.id, 1);
    assert_eq!(p.name, "Blum");
    assert_eq!(p.app_name, "Blum");
    assert_eq!(p.link, "ref_abc");

    let dup = s.add_project(NewProject {
        name: "Blum".into(),
        ..NewProject::default()
    });
    assert!(matches!(dup, Err(AppError::Duplicate(_))));

    let empty = s.add_project(NewProject::default());
    assert!(matches!(empty, Err(AppError::Validation(_))));
}

#[test]
fn project_update_keeps_identity() {
    let s = store();
    let a = s
        .add_project(NewProject {
            name: "A".into(),
            ..NewProject::default()
        })
        .unwrap();
    s.add_project(NewProject {
        name: "B".into(),
        ..NewProject::default()
    })
    .unwrap();

    let updated = s
        .update_project(
            a.id,
            ProjectPatch {
                app_type: Some("game".into()),
                ..ProjectPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.created_at, a.created_at);
    assert_eq!(updated.app_type, "game");

    let clash = s.update_project(
        a.id,
        ProjectPatch {
            name: Some("B".into()),
            ..ProjectPatch::default()
        },
    );
    assert!(matches!(clash, Err(AppError::Duplicate(_))));

    assert!(s.delete_project(a.id).unwrap());
    assert!(!s.delete_project(a.id).unwrap());
    assert!(matches!(s.project(a.id), Err(AppError::NotFound(_))));
}

// ---- accounts ----

#[test]
fn accounts_get_sequential_ids() {
    let s = store();
    let a = s.add_account("TG 1", None).unwrap();
    let b = s.add_account("TG 2", Some(AccountStatus::Blocked)).unwrap();
    assert_eq!((a.id, b.id), (1, 2));
    assert_eq!(b.status, AccountStatus::Blocked);

    assert!(s.delete_account(1).unwrap());
    let c = s.add_account("TG 3", None).unwrap();
    assert_eq!(c.id, 3);

    let missing = s.update_account_status(99, AccountStatus::Active);
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[test]
fn scoped_edits_are_mirrored_into_meta() {
    let s = store();
    let a = s.add_account("TG 1", None).unwrap();
    s.update_account_notes(a.id, "proxy 12", Some("/farm")).unwrap();
    s.set_account_hashtags(a.id, &["#Main".into(), "main".into()], Some("/farm"))
        .unwrap();
    s.update_account_display_name(a.id, "Main one", None).unwrap();

    let meta = s.account_meta_map("/farm").unwrap();
    let entry = meta.get(&a.id).expect("meta entry");
    assert_eq!(entry.notes.as_deref(), Some("proxy 12"));
    assert_eq!(entry.hashtags.as_deref(), Some(&["main".to_string()][..]));
    assert_eq!(entry.display_name, None);

    assert!(s.account_meta_map("/other").unwrap().is_empty());
}

#[test]
fn legacy_unscoped_meta_fills_gaps() {
    let s = store();
    kv::write_json(
        s.conn(),
        keys::ACCOUNT_META,
        &serde_json::json!([
            { "id": 1, "notes": "legacy" },
            { "scope": "/farm", "id": 2, "notes": "scoped" },
            { "id": 2, "notes": "ignored" }
        ]),
    )
    .unwrap();

    let map = s.account_meta_map("/farm").unwrap();
    assert_eq!(map[&1].notes.as_deref(), Some("legacy"));
    assert_eq!(map[&1].scope, "/farm");
    assert_eq!(map[&2].notes.as_deref(), Some("scoped"));
}

#[test]
fn unreadable_documents_fall_back_to_empty() {
    let s = store();
    s.conn()
        .execute(
            "INSERT INTO kv (key, value, updated_at) VALUES ('accounts', 'not json', '')",
            [],
        )
        .unwrap();
    assert!(s.accounts().unwrap().is_empty());

    kv::write_json(
        s.conn(),
        keys::ACCOUNTS,
        &serde_json::json!([{ "id": 4, "name": "TG 4" }, { "name": "no id" }]),
    )
    .unwrap();
    let accounts = s.accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].status, AccountStatus::Active);
}

// ---- tasks ----

#[test]
fn task_with_time_gets_one_shot_reminder() {
    let s = store();
    let t = s.add_daily_task("Claim", Some(now_ms() + 60_000)).unwrap();
    assert_eq!(t.reminders.len(), 1);
    let r = &t.reminders[0];
    assert!(r.id.starts_with("r-"));
    assert_eq!(r.id.rsplit('-').next().map(str::len), Some(6));
    assert_eq!(r.repeat_rule, RepeatRule::Never);

    let plain = s.add_daily_task("Farm", Some(0)).unwrap();
    assert!(plain.reminders.is_empty());

    assert!(matches!(
        s.add_daily_task("  ", None),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn completing_a_task_clears_reminders() {
    let s = store();
    let t = s.add_daily_task("Claim", None).unwrap();
    s.add_reminder(t.id, now_ms() + 1000, RepeatRule::Daily).unwrap();

    let done = s.toggle_daily_task(t.id, true).unwrap();
    assert!(done.is_completed);
    assert!(done.reminders.is_empty());

    let reopened = s.toggle_daily_task(t.id, false).unwrap();
    assert!(!reopened.is_completed);
}

#[test]
fn removing_unknown_reminder_is_not_found() {
    let s = store();
    let t = s.add_daily_task("Claim", None).unwrap();
    assert!(matches!(
        s.remove_reminder(t.id, "r-0-abcdef"),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        s.add_reminder(t.id, 0, RepeatRule::Never),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn new_day_unchecks_tasks_and_clears_logs() {
    let s = store();
    let t = s.add_daily_task("Claim", None).unwrap();
    s.toggle_daily_task(t.id, true).unwrap();
    s.add_log("Launched TG 1 (1/1)").unwrap();

    s.ensure_daily_reset().unwrap();
    assert!(s.daily_tasks().unwrap()[0].is_completed);

    s.ensure_daily_reset_for("2099-01-01").unwrap();
    let raw: Vec<LogEntry> = kv::read_json(s.conn(), keys::LOGS, Vec::new()).unwrap();
    assert!(raw.is_empty());
    assert!(!s.daily_tasks().unwrap()[0].is_completed);
}

// ---- logs ----

#[test]
fn logs_keep_last_day_newest_first() {
    let s = store();
    s.ensure_daily_reset().unwrap();
    let now = now_ms();
    s.save_logs(&[
        LogEntry {
            id: 1,
            message: "old".into(),
            timestamp: now - 25 * 60 * 60 * 1000,
        },
        LogEntry {
            id: 2,
            message: "recent".into(),
            timestamp: now - 1000,
        },
    ])
    .unwrap();
    s.add_log("  newest  ").unwrap();

    let logs = s.logs().unwrap();
    let messages: Vec<&str> = logs.iter().map(|l| l.message.as_str()).collect();
    assert_eq!(messages, vec!["newest", "recent"]);
    assert_eq!(logs[0].id, 3);
}

#[test]
fn logs_are_capped() {
    let s = store();
    for i in 0..205 {
        s.add_log(&format!("entry {}", i)).unwrap();
    }
    assert_eq!(s.logs().unwrap().len(), 200);
}

// ---- settings / auth / hashtags ----

#[test]
fn settings_merge_over_defaults() {
    let s = store();
    kv::write_json(
        s.conn(),
        keys::SETTINGS,
        &serde_json::json!({ "telegramThreads": 4, "language": "en" }),
    )
    .unwrap();
    let settings = s.settings().unwrap();
    assert_eq!(settings.telegram_threads, "4");
    assert_eq!(settings.language, "en");
    assert_eq!(settings.chrome_threads, "1");
    assert_eq!(settings.theme_effect, "none");

    assert!(matches!(
        s.set_setting("nope", "x"),
        Err(AppError::Validation(_))
    ));
    let updated = s.set_setting("telegramFolderPath", " /farm ").unwrap();
    assert_eq!(updated.telegram_folder_path, "/farm");
}

#[test]
fn auth_user_requires_id_and_name() {
    let s = store();
    assert_eq!(s.auth_user().unwrap(), None);

    let bad = User {
        id: "1".into(),
        name: " ".into(),
        username: None,
    };
    assert!(matches!(s.save_auth_user(&bad), Err(AppError::Validation(_))));

    let user = User {
        id: "42".into(),
        name: "Olena".into(),
        username: Some("olena".into()),
    };
    s.save_auth_user(&user).unwrap();
    assert_eq!(s.auth_user().unwrap(), Some(user));

    s.clear_auth_user().unwrap();
    assert_eq!(s.auth_user().unwrap(), None);

    assert!(!s.auth_onboarding_seen().unwrap());
    s.set_auth_onboarding_seen(true).unwrap();
    assert!(s.auth_onboarding_seen().unwrap());
}

#[test]
fn empty_hashtag_link_removes_entry() {
    let s = store();
    s.set_hashtag_link("#Drop", "https://t.me/drop").unwrap();
    let meta = s.hashtag_meta().unwrap();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta[0].tag, "drop");

    s.set_hashtag_link("drop", "  ").unwrap();
    assert!(s.hashtag_meta().unwrap().is_empty());
}

// ---- launch state / stats ----

#[test]
fn launch_state_drops_non_numeric_entries() {
    let s = store();
    assert_eq!(s.launch_state().unwrap(), None);

    kv::write_json(
        s.conn(),
        keys::TELEGRAM_LAUNCH,
        &serde_json::json!({
            "launchedPids": ["12", "x", 13, null],
            "pendingProfiles": [4, "5"],
            "batchSize": 0,
            "totalProfiles": 4
        }),
    )
    .unwrap();
    let state = s.launch_state().unwrap().expect("state");
    assert_eq!(state.launched_pids, vec![12, 13]);
    assert_eq!(state.pending_profiles, vec![4, 5]);
    assert_eq!(state.batch_size, 1);

    s.clear_launch_state().unwrap();
    assert_eq!(s.launch_state().unwrap(), None);
}

#[test]
fn stats_round_live_percent() {
    let s = store();
    assert_eq!(s.stats().unwrap().live_percent, 0);

    s.add_account("TG 1", None).unwrap();
    s.add_account("TG 2", None).unwrap();
    s.add_account("TG 3", Some(AccountStatus::Blocked)).unwrap();
    let stats = s.stats().unwrap();
    assert_eq!(stats.total_accounts, 3);
    assert_eq!(stats.live_accounts, 2);
    assert_eq!(stats.blocked_accounts, 1);
    assert_eq!(stats.live_percent, 67);
}
