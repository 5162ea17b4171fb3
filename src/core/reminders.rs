//! Due-reminder detection, notification and rescheduling.

use crate::errors::AppResult;
use crate::host::NativeHost;
use crate::models::task::{ReminderPatch, RepeatRule};
use crate::store::Store;
use crate::ui::messages::warning;
use crate::utils::time::to_local;
use chrono::{Days, Months};
use std::collections::HashSet;

pub const NOTIFICATION_TITLE: &str = "tgfarm";

/// Next occurrence in local calendar terms; `None` for one-shot reminders.
/// Month steps clamp to the last day of the target month.
pub fn next_reminder_time(at: i64, rule: RepeatRule) -> Option<i64> {
    let current = to_local(at)?;
    let next = match rule {
        RepeatRule::Never => return None,
        RepeatRule::Daily => current.checked_add_days(Days::new(1)),
        RepeatRule::Weekly => current.checked_add_days(Days::new(7)),
        RepeatRule::Biweekly => current.checked_add_days(Days::new(14)),
        // Jan 31 + 1 month is Feb 28, not an overflow into March.
        RepeatRule::Monthly => current.checked_add_months(Months::new(1)),
        RepeatRule::Quarterly => current.checked_add_months(Months::new(3)),
        RepeatRule::Semiannual => current.checked_add_months(Months::new(6)),
        RepeatRule::Yearly => current.checked_add_months(Months::new(12)),
    };
    next.map(|dt| dt.timestamp_millis())
}

/// Remembers what was already announced during this session so a reminder
/// that failed to persist is not repeated on every tick.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    notified: HashSet<String>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify every due reminder of every open task. Returns how many
    /// notifications went out.
    pub fn check<H: NativeHost>(&mut self, store: &Store, host: &H, now: i64) -> AppResult<usize> {
        let tasks = store.daily_tasks()?;
        let mut sent = 0;

        for task in tasks.iter().filter(|t| !t.is_completed) {
            for reminder in task.reminders.iter().filter(|r| r.is_due(now)) {
                let key = format!("{}:{}:{}", task.id, reminder.id, reminder.remind_at);
                if self.notified.contains(&key) {
                    continue;
                }

                let body = format!("Reminder: {}", task.title);
                if let Err(e) = host.send_notification(NOTIFICATION_TITLE, &body) {
                    warning(format!("Reminder notification failed: {}", e));
                    continue;
                }
                self.notified.insert(key);
                sent += 1;

                match next_reminder_time(reminder.remind_at, reminder.repeat_rule) {
                    Some(next) => {
                        store.update_reminder(
                            task.id,
                            &reminder.id,
                            ReminderPatch {
                                remind_at: Some(next),
                                reminded_at: Some(None),
                                repeat_rule: Some(reminder.repeat_rule),
                            },
                        )?;
                    }
                    None => {
                        store.mark_reminded(task.id, &reminder.id, now)?;
                    }
                }
                store.add_log(&body)?;
            }
        }

        Ok(sent)
    }
}
