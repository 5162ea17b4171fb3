pub mod account;
pub mod hashtag;
pub mod launch;
pub mod log_entry;
pub mod process;
pub mod project;
pub mod settings;
pub mod task;
pub mod user;

/// Next auto-increment id: `max(id) + 1`, 1 for an empty list.
pub fn next_id<I>(ids: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    ids.into_iter().fold(0, i64::max) + 1
}
