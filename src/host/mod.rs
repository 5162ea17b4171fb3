//! Boundary to the operating system: directory reads, client processes and
//! desktop notifications. Core logic only talks to [`NativeHost`].

mod link;
mod system;

pub use link::build_telegram_link;
pub use system::SystemHost;

use crate::errors::AppResult;
use crate::models::launch::LaunchParams;
use crate::models::process::TelegramProcess;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
}

pub trait NativeHost {
    fn read_directory(&self, path: &str) -> AppResult<Vec<DirEntry>>;

    /// Running client processes that may belong to managed accounts.
    fn list_processes(&self) -> AppResult<Vec<TelegramProcess>>;

    /// Start one client per profile id; returns the pids that came up.
    fn launch_profiles(
        &self,
        params: Option<&LaunchParams>,
        profile_ids: &[u32],
        folder: &str,
    ) -> AppResult<Vec<u32>>;

    fn close_processes(&self, pids: &[u32]) -> AppResult<()>;

    fn send_notification(&self, title: &str, body: &str) -> AppResult<()>;
}
