#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::cell::{Cell, RefCell};
use std::env;
use std::fs;
use std::path::PathBuf;
use tgfarm::errors::{AppError, AppResult};
use tgfarm::host::{DirEntry, NativeHost};
use tgfarm::models::launch::LaunchParams;
use tgfarm::models::process::TelegramProcess;
use tgfarm::store::Store;

pub fn tg() -> Command {
    cargo_bin_cmd!("tgfarm")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tgfarm.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `tgfarm --db <db> --test init`
pub fn init_db(db_path: &str) {
    tg().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Store with a profile folder configured.
pub fn store_with_folder(threads: &str) -> Store {
    let store = Store::in_memory().expect("in-memory store");
    store
        .set_setting("telegramFolderPath", "/farm")
        .expect("folder");
    store.set_setting("telegramThreads", threads).expect("threads");
    store
}

/// In-process stand-in for the operating system. Launched profiles show up
/// as running processes under `/farm/TG <n>/Telegram`.
#[derive(Default)]
pub struct FakeHost {
    pub dirs: RefCell<Vec<DirEntry>>,
    pub processes: RefCell<Vec<TelegramProcess>>,
    pub launches: RefCell<Vec<(Vec<u32>, Option<LaunchParams>)>>,
    pub closed: RefCell<Vec<Vec<u32>>>,
    pub notifications: RefCell<Vec<(String, String)>>,
    pub fail_processes: Cell<bool>,
    pub fail_notifications: Cell<bool>,
    pub fail_launch: Cell<bool>,
    next_pid: Cell<u32>,
}

impl FakeHost {
    pub fn new() -> Self {
        let host = Self::default();
        host.next_pid.set(1000);
        host
    }

    pub fn with_dirs(names: &[&str]) -> Self {
        let host = Self::new();
        *host.dirs.borrow_mut() = names
            .iter()
            .map(|n| DirEntry {
                name: n.to_string(),
                path: format!("/farm/{}", n),
                is_dir: true,
            })
            .collect();
        host
    }

    pub fn add_process(&self, pid: u32, name: &str, path: &str) {
        self.processes
            .borrow_mut()
            .push(TelegramProcess::new(pid, name, path));
    }

    pub fn launched_batches(&self) -> Vec<Vec<u32>> {
        self.launches.borrow().iter().map(|(b, _)| b.clone()).collect()
    }
}

impl NativeHost for FakeHost {
    fn read_directory(&self, path: &str) -> AppResult<Vec<DirEntry>> {
        if path.trim().is_empty() {
            return Err(AppError::Host("empty path".into()));
        }
        Ok(self.dirs.borrow().clone())
    }

    fn list_processes(&self) -> AppResult<Vec<TelegramProcess>> {
        if self.fail_processes.get() {
            return Err(AppError::Host("process list unavailable".into()));
        }
        Ok(self.processes.borrow().clone())
    }

    fn launch_profiles(
        &self,
        params: Option<&LaunchParams>,
        profile_ids: &[u32],
        folder: &str,
    ) -> AppResult<Vec<u32>> {
        if self.fail_launch.get() {
            return Err(AppError::Host("client binary missing".into()));
        }
        let mut pids = Vec::new();
        for id in profile_ids {
            let pid = self.next_pid.get();
            self.next_pid.set(pid + 1);
            self.add_process(pid, "Telegram", &format!("{}/TG {}/Telegram", folder, id));
            pids.push(pid);
        }
        self.launches
            .borrow_mut()
            .push((profile_ids.to_vec(), params.cloned()));
        Ok(pids)
    }

    fn close_processes(&self, pids: &[u32]) -> AppResult<()> {
        self.processes
            .borrow_mut()
            .retain(|p| !pids.contains(&p.pid));
        self.closed.borrow_mut().push(pids.to_vec());
        Ok(())
    }

    fn send_notification(&self, title: &str, body: &str) -> AppResult<()> {
        if self.fail_notifications.get() {
            return Err(AppError::Host("notifications unavailable".into()));
        }
        self.notifications
            .borrow_mut()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}
