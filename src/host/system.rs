use super::{DirEntry, NativeHost, build_telegram_link};
use crate::errors::{AppError, AppResult};
use crate::models::launch::LaunchParams;
use crate::models::process::TelegramProcess;
use crate::ui::messages::{info, warning};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(target_os = "windows")]
const CLIENT_BINARY: &str = "Telegram.exe";
#[cfg(not(target_os = "windows"))]
const CLIENT_BINARY: &str = "Telegram";

/// Real host: local filesystem, `sysinfo` process table, terminal notifications.
#[derive(Default)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }

    /// `<folder>/TG <n>`, falling back to `<folder>/<n>`.
    fn profile_dir(folder: &Path, profile: u32) -> Option<PathBuf> {
        [format!("TG {}", profile), format!("TG{}", profile), profile.to_string()]
            .into_iter()
            .map(|name| folder.join(name))
            .find(|p| p.is_dir())
    }
}

impl NativeHost for SystemHost {
    fn read_directory(&self, path: &str) -> AppResult<Vec<DirEntry>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            out.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path().to_string_lossy().to_string(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    fn list_processes(&self) -> AppResult<Vec<TelegramProcess>> {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let mut out: Vec<TelegramProcess> = sys
            .processes()
            .iter()
            .filter_map(|(pid, p)| {
                let name = p.name().to_string_lossy().to_string();
                if !name.to_lowercase().contains("telegram") {
                    return None;
                }
                let path = p
                    .exe()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_default();
                Some(TelegramProcess::new(pid.as_u32(), name, path))
            })
            .collect();
        out.sort_by_key(|p| p.pid);
        Ok(out)
    }

    fn launch_profiles(
        &self,
        params: Option<&LaunchParams>,
        profile_ids: &[u32],
        folder: &str,
    ) -> AppResult<Vec<u32>> {
        let root = Path::new(folder);
        if !root.is_dir() {
            return Err(AppError::Host(format!("Telegram folder not found: {}", folder)));
        }
        let link = params.and_then(build_telegram_link);

        let mut pids = Vec::with_capacity(profile_ids.len());
        for &profile in profile_ids {
            let Some(dir) = Self::profile_dir(root, profile) else {
                warning(format!("Profile folder for TG {} not found, skipped", profile));
                continue;
            };
            let binary = dir.join(CLIENT_BINARY);
            if !binary.exists() {
                warning(format!("{} missing in {}, skipped", CLIENT_BINARY, dir.display()));
                continue;
            }

            let mut cmd = Command::new(&binary);
            cmd.arg("-workdir").arg(&dir);
            if let Some(l) = &link {
                cmd.arg("--").arg(l);
            }
            let child = cmd
                .spawn()
                .map_err(|e| AppError::Host(format!("Failed to start TG {}: {}", profile, e)))?;
            pids.push(child.id());
        }
        Ok(pids)
    }

    fn close_processes(&self, pids: &[u32]) -> AppResult<()> {
        if pids.is_empty() {
            return Ok(());
        }
        let targets: Vec<Pid> = pids.iter().map(|p| Pid::from_u32(*p)).collect();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&targets), true);

        for pid in targets {
            // Already gone counts as closed; a reused pid is left alone.
            let Some(process) = sys.process(pid) else {
                continue;
            };
            let name = process.name().to_string_lossy().to_lowercase();
            if !name.contains("telegram") {
                warning(format!("pid {} is no longer a Telegram client, skipped", pid));
                continue;
            }
            if !process.kill() {
                return Err(AppError::Host(format!("Failed to close pid {}", pid)));
            }
        }
        Ok(())
    }

    fn send_notification(&self, title: &str, body: &str) -> AppResult<()> {
        info(format!("\x07[{}] {}", title, body));
        Ok(())
    }
}
