use tgfarm::core::helpers::{
    account_hashtags, account_path, build_profile_list, extract_profile_number, has_user_notes,
    is_system_generated_note, normalize_hashtag, normalize_path, stable_account_id, system_note,
    telegram_batch_size,
};
use tgfarm::models::account::{Account, AccountStatus};

#[test]
fn stable_id_follows_djb2_xor() {
    assert_eq!(stable_account_id(""), 5381);
    // (5381 * 33) ^ 'a'
    assert_eq!(stable_account_id("a"), 177604);
    assert_eq!(
        stable_account_id("/farm/Profile A"),
        stable_account_id("/farm/Profile A")
    );
    assert_ne!(stable_account_id("/farm/a"), stable_account_id("/farm/b"));
}

#[test]
fn stable_id_is_never_negative_or_zero() {
    for seed in ["C:\\Users\\x\\TG 1", "дуже довгий шлях/профіль", "🙂🙂🙂", "zzzzzzzzzzzzzzzz"] {
        assert!(stable_account_id(seed) > 0, "seed {seed}");
    }
}

#[test]
fn batch_size_uses_leading_integer() {
    assert_eq!(telegram_batch_size(Some("3")), 3);
    assert_eq!(telegram_batch_size(Some(" 12 ")), 12);
    assert_eq!(telegram_batch_size(Some("4 threads")), 4);
    assert_eq!(telegram_batch_size(Some("0")), 1);
    assert_eq!(telegram_batch_size(Some("-2")), 1);
    assert_eq!(telegram_batch_size(Some("many")), 1);
    assert_eq!(telegram_batch_size(None), 1);
}

#[test]
fn profile_list_is_inclusive_and_mix_keeps_members() {
    assert_eq!(build_profile_list(3, 6, false), vec![3, 4, 5, 6]);
    assert_eq!(build_profile_list(5, 5, false), vec![5]);
    assert!(build_profile_list(6, 3, false).is_empty());

    let mut mixed = build_profile_list(1, 20, true);
    assert_eq!(mixed.len(), 20);
    mixed.sort_unstable();
    assert_eq!(mixed, (1..=20).collect::<Vec<_>>());
}

#[test]
fn profile_number_extraction() {
    assert_eq!(extract_profile_number("TG 12"), Some(12));
    assert_eq!(extract_profile_number("tg7"), Some(7));
    assert_eq!(extract_profile_number("/farm/TG 3/Telegram.exe"), Some(3));
    assert_eq!(extract_profile_number("Telegram"), None);
    assert_eq!(extract_profile_number("stg 4"), None);
}

#[test]
fn path_and_hashtag_normalization() {
    assert_eq!(normalize_path(" C:\\Farm\\\\TG 1 "), "c:/farm/tg 1");
    assert_eq!(normalize_path("/a//b///c"), "/a/b/c");
    assert_eq!(normalize_hashtag("  ##Air Drop "), "airdrop");
    assert_eq!(normalize_hashtag("#"), "");
}

#[test]
fn system_notes_are_recognized() {
    let note = system_note("/farm/TG 1", "TG 1", AccountStatus::Active);
    assert_eq!(note, "/farm/TG 1 (TG 1) - active");
    assert!(is_system_generated_note(&note));
    assert!(is_system_generated_note("/farm/x (x) - Blocked (since monday)"));
    assert!(!is_system_generated_note("needs a new proxy"));
    assert!(!is_system_generated_note(""));
}

#[test]
fn user_notes_and_account_path() {
    let mut account = Account::new(1, "TG 1");
    assert!(!has_user_notes(&account));

    account.notes = Some(system_note("/Farm/TG 1", "TG 1", AccountStatus::Inactive));
    assert!(!has_user_notes(&account));
    assert_eq!(account_path(&account), "/farm/tg 1");

    account.notes = Some("warmed up, do not touch".into());
    assert!(has_user_notes(&account));
}

#[test]
fn account_hashtags_are_deduplicated() {
    let mut account = Account::new(1, "TG 1");
    account.hashtags = vec!["#Drop".into(), "drop".into(), " ".into(), "#main".into()];
    assert_eq!(account_hashtags(&account), vec!["drop", "main"]);
}
