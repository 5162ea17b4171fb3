use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{Commands, LaunchAction, LaunchSelection};
use crate::config::Config;
use crate::core::sequencer::{
    CancelFlag, LaunchProgress, LaunchSequencer, LaunchTarget, select_profiles,
};
use crate::errors::{AppError, AppResult};
use crate::host::SystemHost;
use crate::store::Store;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET};
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

fn has_selection(sel: &LaunchSelection) -> bool {
    sel.project.is_some() || !sel.ids.is_empty() || sel.status.is_some() || sel.tag.is_some()
}

fn build_target(store: &Store, sel: &LaunchSelection) -> AppResult<LaunchTarget> {
    if let Some(name) = &sel.project {
        return Ok(LaunchTarget::Project {
            name: name.clone(),
            start: sel.from.clone().unwrap_or_default(),
            end: sel.to.clone().unwrap_or_default(),
            mix: sel.mix,
        });
    }
    if !sel.ids.is_empty() {
        return Ok(LaunchTarget::Profiles {
            ids: sel.ids.clone(),
            mix: sel.mix,
        });
    }
    if sel.status.is_some() || sel.tag.is_some() {
        let ids = select_profiles(&store.accounts()?, sel.status, sel.tag.as_deref());
        if ids.is_empty() {
            return Err(AppError::Validation(
                "no account with a profile number matches the filter".into(),
            ));
        }
        return Ok(LaunchTarget::Profiles { ids, mix: sel.mix });
    }
    Err(AppError::Validation(
        "choose what to launch: --project with --from/--to, --ids, --status or --tag".into(),
    ))
}

fn print_progress(p: &LaunchProgress) {
    if p.finished {
        success(format!("Launch finished: {}/{} profiles launched", p.launched, p.total));
        return;
    }
    println!(
        "{}▶ {}/{} launched{}, {} pending, batch size {}",
        CYAN, p.launched, p.total, RESET, p.pending, p.batch_size
    );
    if !p.current_batch.is_empty() {
        let ids: Vec<String> = p.current_batch.iter().map(|i| format!("TG {}", i)).collect();
        println!("  {}open:{} {}", GREEN, RESET, ids.join(", "));
    }
    if !p.current_pids.is_empty() {
        let pids: Vec<String> = p.current_pids.iter().map(u32::to_string).collect();
        println!("  {}pids: {}{}", GREY, pids.join(", "), RESET);
    }
}

/// Forward stdin lines; "s" also raises the cancel flag right away so an
/// in-flight step stops between host calls.
fn spawn_input(cancel: CancelFlag) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let cmd = line.trim().to_lowercase();
            if cmd == "s" {
                cancel.cancel();
            }
            if tx.send(cmd).is_err() {
                break;
            }
        }
    });
    rx
}

fn run_interactive(store: &Store, sel: &LaunchSelection) -> AppResult<()> {
    let host = SystemHost::new();
    let cancel = CancelFlag::new();
    let sequencer = LaunchSequencer::new(store, &host).with_cancel(cancel.clone());

    // 1️⃣ resume or start
    let mut progress = match sequencer.progress()? {
        Some(p) if !has_selection(sel) => {
            info("Resuming the launch in progress");
            p
        }
        _ => sequencer.start(build_target(store, sel)?)?,
    };

    // 2️⃣ step through batches
    let input = spawn_input(cancel.clone());
    loop {
        print_progress(&progress);
        if progress.finished {
            return Ok(());
        }

        print!("[Enter] next batch · [q] finish · [s] stop and keep the queue > ");
        io::stdout().flush()?;

        let cmd = input.recv().unwrap_or_else(|_| "q".to_string());
        match cmd.as_str() {
            "q" => progress = sequencer.finish()?,
            "s" => {
                info("Stopped; resume with `tgfarm launch run` or `tgfarm launch next`");
                return Ok(());
            }
            _ => match sequencer.continue_next() {
                Ok(p) => progress = p,
                Err(AppError::Cancelled) => {
                    warning("Launch paused before the next batch; the queue is kept");
                    return Ok(());
                }
                Err(e) => return Err(e),
            },
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Launch { action } = cmd else {
        return Ok(());
    };
    let store = open_store(cfg)?;
    let host = SystemHost::new();
    let sequencer = LaunchSequencer::new(&store, &host);

    match action {
        LaunchAction::Start { selection } => {
            let progress = sequencer.start(build_target(&store, selection)?)?;
            print_progress(&progress);
        }
        LaunchAction::Next => print_progress(&sequencer.continue_next()?),
        LaunchAction::Finish => print_progress(&sequencer.finish()?),
        LaunchAction::Status { json } => {
            let progress = sequencer.progress()?;
            if *json {
                return print_json(&progress);
            }
            match (progress, sequencer.state()?) {
                (Some(p), Some(state)) => {
                    if !state.selected_project.is_empty() {
                        println!(
                            "Project {} · profiles {}..{}{}",
                            state.selected_project,
                            state.start_range,
                            state.end_range,
                            if state.is_mix { " (mixed)" } else { "" }
                        );
                    }
                    print_progress(&p);
                }
                _ => info("No launch in progress."),
            }
        }
        LaunchAction::Run { selection } => run_interactive(&store, selection)?,
    }
    Ok(())
}
