use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminders::ReminderScheduler;
use crate::core::status::{StatusPoller, account_stats, apply_effective_statuses};
use crate::errors::AppResult;
use crate::host::SystemHost;
use crate::ui::messages::{info, warning};
use crate::utils::time::now_ms;
use std::thread;
use std::time::{Duration, Instant};

/// Huge configured intervals saturate at one day instead of overflowing.
fn after(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay.min(Duration::from_secs(86_400)))
        .unwrap_or(now)
}

/// Handle the `watch` command: poll process status on its own backoff
/// schedule and check reminders on a fixed interval, until interrupted.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Watch {
        once,
        no_status,
        no_reminders,
    } = cmd
    else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let host = SystemHost::new();
    let mut poller = StatusPoller::new(
        Duration::from_secs(cfg.poll_interval_secs),
        Duration::from_secs(cfg.poll_max_backoff_secs),
    );
    let mut scheduler = ReminderScheduler::new();
    let reminder_every = Duration::from_secs(cfg.reminder_interval_secs.max(1));

    let mut next_poll = Instant::now();
    let mut next_reminders = Instant::now();
    let mut last_summary = None;

    if !*once {
        info("Watching… (Ctrl+C to stop)");
    }

    loop {
        let now = Instant::now();

        // ---- STATUS ----
        if !*no_status && now >= next_poll {
            match poller.poll_once(&store, &host) {
                Ok(views) => {
                    if let Err(e) = apply_effective_statuses(&store, &views) {
                        warning(format!("Saving account statuses failed: {}", e));
                    }
                    let s = account_stats(&views);
                    let summary = (s.running, s.active, s.blocked);
                    if last_summary != Some(summary) {
                        info(format!(
                            "{} running · {} active · {} blocked (of {})",
                            s.running, s.active, s.blocked, s.total
                        ));
                        last_summary = Some(summary);
                    }
                }
                Err(e) => warning(format!(
                    "Status poll failed ({}), retrying in {}s",
                    e,
                    poller.next_delay().as_secs()
                )),
            }
            next_poll = after(now, poller.next_delay());
        }

        // ---- REMINDERS ----
        if !*no_reminders && now >= next_reminders {
            if let Err(e) = scheduler.check(&store, &host, now_ms()) {
                warning(format!("Reminder check failed: {}", e));
            }
            next_reminders = after(now, reminder_every);
        }

        if *once {
            return Ok(());
        }

        let wake = match (*no_status, *no_reminders) {
            (true, true) => return Ok(()),
            (true, false) => next_reminders,
            (false, true) => next_poll,
            (false, false) => next_poll.min(next_reminders),
        };
        thread::sleep(wake.saturating_duration_since(Instant::now()));
    }
}
