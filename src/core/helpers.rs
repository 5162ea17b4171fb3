//! Pure helpers shared by the store, the matcher and the launch sequencer.

use crate::models::account::{Account, AccountStatus};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

static PROFILE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?-u:\b)tg\s*([0-9]+)(?-u:\b)").expect("valid regex"));

static SYSTEM_NOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\([^)]+\)\s*-\s*(?:active|inactive|blocked))(?:\s*\([^)]+\))?$")
        .expect("valid regex")
});

static REPEATED_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").expect("valid regex"));

/// Deterministic numeric id for a seed string (djb2 with xor, 32-bit wrapping
/// over UTF-16 code units). Never returns 0.
pub fn stable_account_id(seed: &str) -> i64 {
    let mut hash: i32 = 5381;
    for unit in seed.encode_utf16() {
        hash = (hash << 5).wrapping_add(hash) ^ i32::from(unit);
    }
    match i64::from(hash).abs() {
        0 => 1,
        n => n,
    }
}

/// Batch size from the configured thread count; anything that is not a
/// positive integer means 1.
pub fn telegram_batch_size(threads: Option<&str>) -> usize {
    let raw = threads.unwrap_or("1").trim();
    let digits: String = raw
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(_, c)| c)
        .collect();
    match digits.parse::<i64>() {
        Ok(n) if n > 0 => n as usize,
        _ => 1,
    }
}

/// Inclusive `start..=end`, shuffled when `mix` is set.
pub fn build_profile_list(start: u32, end: u32, mix: bool) -> Vec<u32> {
    let mut list: Vec<u32> = if start <= end {
        (start..=end).collect()
    } else {
        Vec::new()
    };
    if mix {
        list.shuffle(&mut rand::thread_rng());
    }
    list
}

pub fn normalize_text(value: &str) -> String {
    value.to_lowercase().trim().to_string()
}

pub fn normalize_path(value: &str) -> String {
    let text = normalize_text(value).replace('\\', "/");
    REPEATED_SLASH.replace_all(&text, "/").into_owned()
}

/// The `N` in "tg N" / "TG_N"-style folder and session names.
pub fn extract_profile_number(value: &str) -> Option<u32> {
    let text = normalize_text(value);
    PROFILE_NUMBER
        .captures(&text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn normalize_hashtag(value: &str) -> String {
    value
        .trim()
        .trim_start_matches('#')
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Notes written by a folder scan look like `<path> (<name>) - <status>`.
pub fn is_system_generated_note(value: &str) -> bool {
    let text = value.trim();
    !text.is_empty() && SYSTEM_NOTE.is_match(text)
}

pub fn system_note(path: &str, name: &str, status: AccountStatus) -> String {
    format!("{} ({}) - {}", path, name, status)
}

pub fn has_user_notes(account: &Account) -> bool {
    match account.notes.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => !is_system_generated_note(text),
        _ => false,
    }
}

/// Normalized, non-empty, first occurrence wins.
pub fn normalize_hashtags<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let t = normalize_hashtag(tag);
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

pub fn account_hashtags(account: &Account) -> Vec<String> {
    normalize_hashtags(account.hashtags.iter().map(String::as_str))
}

/// Folder path an account was scanned from: the note up to the first `" ("`.
pub fn account_path(account: &Account) -> String {
    let notes = account.notes.as_deref().unwrap_or("");
    let head = notes.split(" (").next().unwrap_or("");
    normalize_path(head)
}
