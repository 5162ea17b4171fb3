//! Batched launch of account profiles.
//!
//! A launch walks a queue of profile numbers in batches of the configured
//! thread count. One batch runs at a time; `continue_next` closes it and
//! starts the following one, `finish` closes whatever is open. The queue is
//! persisted after every completed step, so a launch survives restarts.

use crate::core::helpers::{
    account_hashtags, account_path, build_profile_list, extract_profile_number,
    normalize_hashtag, telegram_batch_size,
};
use crate::errors::{AppError, AppResult};
use crate::host::NativeHost;
use crate::models::account::{Account, AccountStatus};
use crate::models::launch::{LaunchMode, LaunchParams, LaunchState};
use crate::store::Store;
use crate::utils::time::now_ms;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop request, checked between host calls.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub enum LaunchTarget {
    /// Range of profile numbers opened with a project's link.
    Project {
        name: String,
        start: String,
        end: String,
        mix: bool,
    },
    /// Explicit profile numbers, no link.
    Profiles { ids: Vec<u32>, mix: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchProgress {
    pub launched: usize,
    pub total: usize,
    pub pending: usize,
    pub batch_size: usize,
    pub current_batch: Vec<u32>,
    pub current_pids: Vec<u32>,
    pub finished: bool,
}

impl LaunchProgress {
    fn from_state(state: &LaunchState, current_batch: Vec<u32>) -> Self {
        Self {
            launched: state.total_profiles.saturating_sub(state.pending_profiles.len()),
            total: state.total_profiles,
            pending: state.pending_profiles.len(),
            batch_size: state.batch_size,
            current_batch,
            current_pids: state.launched_pids.clone(),
            finished: false,
        }
    }

    fn finished(state: &LaunchState) -> Self {
        Self {
            launched: state.total_profiles,
            total: state.total_profiles,
            pending: 0,
            batch_size: state.batch_size,
            current_batch: Vec::new(),
            current_pids: Vec::new(),
            finished: true,
        }
    }
}

/// Profile numbers of the accounts matching the filters, in account order.
/// Accounts without a recognizable "TG N" name or folder are skipped.
pub fn select_profiles(
    accounts: &[Account],
    status: Option<AccountStatus>,
    tag: Option<&str>,
) -> Vec<u32> {
    let tag = tag.map(normalize_hashtag).filter(|t| !t.is_empty());
    let mut out = Vec::new();
    for account in accounts {
        if status.is_some_and(|s| s != account.status) {
            continue;
        }
        if let Some(t) = &tag
            && !account_hashtags(account).contains(t)
        {
            continue;
        }
        let profile = extract_profile_number(&account.name)
            .or_else(|| extract_profile_number(&account_path(account)));
        if let Some(p) = profile
            && !out.contains(&p)
        {
            out.push(p);
        }
    }
    out
}

fn parse_bound(label: &str, raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("{} of range is not a number: '{}'", label, raw)))
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct LaunchSequencer<'a, H: NativeHost> {
    store: &'a Store,
    host: &'a H,
    cancel: CancelFlag,
}

impl<'a, H: NativeHost> LaunchSequencer<'a, H> {
    pub fn new(store: &'a Store, host: &'a H) -> Self {
        Self {
            store,
            host,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    fn check_cancel(&self) -> AppResult<()> {
        if self.cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        Ok(())
    }

    fn folder(&self) -> AppResult<String> {
        let folder = self.store.settings()?.telegram_folder_path.trim().to_string();
        if folder.is_empty() {
            return Err(AppError::Validation(
                "telegramFolderPath is not set (tgfarm settings set telegramFolderPath <dir>)".into(),
            ));
        }
        Ok(folder)
    }

    pub fn state(&self) -> AppResult<Option<LaunchState>> {
        self.store.launch_state()
    }

    pub fn progress(&self) -> AppResult<Option<LaunchProgress>> {
        Ok(self
            .store
            .launch_state()?
            .map(|s| LaunchProgress::from_state(&s, Vec::new())))
    }

    /// Build the queue and launch the first batch. Nothing is persisted
    /// unless the first batch starts.
    pub fn start(&self, target: LaunchTarget) -> AppResult<LaunchProgress> {
        if let Some(existing) = self.store.launch_state()?
            && (!existing.pending_profiles.is_empty() || !existing.launched_pids.is_empty())
        {
            return Err(AppError::LaunchInProgress(existing.pending_profiles.len()));
        }

        let settings = self.store.settings()?;
        let folder = self.folder()?;
        let batch_size = telegram_batch_size(Some(&settings.telegram_threads));

        let mut state = LaunchState {
            batch_size,
            updated_at: now_ms(),
            ..LaunchState::default()
        };

        match target {
            LaunchTarget::Project {
                name,
                start,
                end,
                mix,
            } => {
                let project = self
                    .store
                    .project_by_name(&name)?
                    .ok_or_else(|| AppError::NotFound(format!("Project '{}'", name.trim())))?;
                let first = parse_bound("start", &start)?;
                let last = parse_bound("end", &end)?;
                if first > last {
                    return Err(AppError::Validation(format!(
                        "range start {} is after end {}",
                        first, last
                    )));
                }

                state.selected_project = project.name.clone();
                state.start_range = first.to_string();
                state.end_range = last.to_string();
                state.is_mix = mix;
                state.pending_profiles = build_profile_list(first, last, mix);
                state.launch_mode = LaunchMode::Project;
                state.launch_params = Some(LaunchParams {
                    app_name: project.app_name,
                    app_type: project.app_type,
                    ref_link: project.ref_link,
                    mixed: project.mixed,
                    ..LaunchParams::default()
                });
            }
            LaunchTarget::Profiles { ids, mix } => {
                let mut unique: Vec<u32> = Vec::with_capacity(ids.len());
                for id in ids {
                    if !unique.contains(&id) {
                        unique.push(id);
                    }
                }
                if mix {
                    unique.shuffle(&mut rand::thread_rng());
                }
                state.start_range = unique.iter().min().map(u32::to_string).unwrap_or_default();
                state.end_range = unique.iter().max().map(u32::to_string).unwrap_or_default();
                state.is_mix = mix;
                state.pending_profiles = unique;
                state.launch_mode = LaunchMode::Plain;
            }
        }

        if state.pending_profiles.is_empty() {
            return Err(AppError::Validation("no profiles to launch".into()));
        }
        state.total_profiles = state.pending_profiles.len();

        self.launch_batch(state, &folder)
    }

    /// Take the next batch off the queue and hand it to the host.
    fn launch_batch(&self, mut state: LaunchState, folder: &str) -> AppResult<LaunchProgress> {
        self.check_cancel()?;

        let take = state.batch_size.max(1).min(state.pending_profiles.len());
        let batch: Vec<u32> = state.pending_profiles[..take].to_vec();
        let pids = self
            .host
            .launch_profiles(state.launch_params.as_ref(), &batch, folder)?;

        state.pending_profiles.drain(..take);
        state.launched_pids = pids;
        state.updated_at = now_ms();
        self.store.save_launch_state(&state)?;

        let progress = LaunchProgress::from_state(&state, batch);
        self.store.add_log(&format!(
            "Launched TG {} ({}/{})",
            join_ids(&progress.current_batch),
            progress.launched,
            progress.total
        ))?;
        Ok(progress)
    }

    /// Close the open batch and start the next one; finishes when the queue
    /// is empty.
    pub fn continue_next(&self) -> AppResult<LaunchProgress> {
        let mut state = self.store.launch_state()?.ok_or(AppError::NoActiveLaunch)?;
        if state.pending_profiles.is_empty() {
            return self.finish();
        }
        let folder = self.folder()?;

        self.check_cancel()?;
        if !state.launched_pids.is_empty() {
            self.host.close_processes(&state.launched_pids)?;
            // Closed pids must not survive a failed launch below.
            state.launched_pids.clear();
            state.updated_at = now_ms();
            self.store.save_launch_state(&state)?;
        }

        if self.cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        self.launch_batch(state, &folder)
    }

    /// Close the open batch and drop the queue.
    pub fn finish(&self) -> AppResult<LaunchProgress> {
        let state = self.store.launch_state()?.ok_or(AppError::NoActiveLaunch)?;
        if !state.launched_pids.is_empty() {
            self.host.close_processes(&state.launched_pids)?;
        }
        self.store.clear_launch_state()?;

        let skipped = state.pending_profiles.len();
        let message = if skipped > 0 {
            format!(
                "Launch finished early: {} of {} profiles launched",
                state.total_profiles.saturating_sub(skipped),
                state.total_profiles
            )
        } else {
            format!("Launch finished: {} profiles", state.total_profiles)
        };
        self.store.add_log(&message)?;

        let mut progress = LaunchProgress::finished(&state);
        progress.launched = state.total_profiles.saturating_sub(skipped);
        Ok(progress)
    }
}
