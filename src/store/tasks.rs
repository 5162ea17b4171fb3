use super::{Store, keys};
use crate::errors::{AppError, AppResult};
use crate::models::next_id;
use crate::models::task::{DailyTask, Reminder, ReminderPatch, RepeatRule};
use crate::utils::time::now_ms;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// `r-<ms>-<6 lowercase alphanumerics>`
pub fn new_reminder_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("r-{}-{}", now_ms(), suffix)
}

/// Reminders without a positive time are dropped.
fn clean_reminders(reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders
        .into_iter()
        .enumerate()
        .filter(|(_, r)| r.remind_at > 0)
        .map(|(i, r)| Reminder {
            id: if r.id.trim().is_empty() {
                format!("r-{}-{}", r.remind_at, i)
            } else {
                r.id
            },
            ..r
        })
        .collect()
}

impl Store {
    pub fn daily_tasks(&self) -> AppResult<Vec<DailyTask>> {
        self.ensure_daily_reset()?;
        self.load_tasks()
    }

    fn load_tasks(&self) -> AppResult<Vec<DailyTask>> {
        let tasks: Vec<DailyTask> = self.read_list(keys::DAILY_TASKS)?;
        Ok(tasks
            .into_iter()
            .map(|t| DailyTask {
                reminders: clean_reminders(t.reminders),
                ..t
            })
            .collect())
    }

    pub fn save_daily_tasks(&self, tasks: &[DailyTask]) -> AppResult<()> {
        self.write(keys::DAILY_TASKS, tasks)
    }

    pub fn add_daily_task(&self, title: &str, remind_at: Option<i64>) -> AppResult<DailyTask> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("task title is empty".into()));
        }

        let mut tasks = self.daily_tasks()?;
        let reminders = match remind_at {
            Some(at) if at > 0 => vec![Reminder {
                id: new_reminder_id(),
                remind_at: at,
                reminded_at: None,
                repeat_rule: RepeatRule::Never,
            }],
            _ => Vec::new(),
        };

        let created = DailyTask {
            id: next_id(tasks.iter().map(|t| t.id)),
            title: title.to_string(),
            is_completed: false,
            reminders,
        };
        tasks.push(created.clone());
        self.save_daily_tasks(&tasks)?;
        Ok(created)
    }

    fn modify_task<F>(&self, id: i64, f: F) -> AppResult<DailyTask>
    where
        F: FnOnce(&mut DailyTask) -> AppResult<()>,
    {
        let mut tasks = self.daily_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Task #{}", id)))?;
        f(task)?;
        let updated = task.clone();
        self.save_daily_tasks(&tasks)?;
        Ok(updated)
    }

    /// Completing a task drops its reminders.
    pub fn toggle_daily_task(&self, id: i64, completed: bool) -> AppResult<DailyTask> {
        self.modify_task(id, |t| {
            t.is_completed = completed;
            if completed {
                t.reminders.clear();
            }
            Ok(())
        })
    }

    pub fn rename_daily_task(&self, id: i64, title: &str) -> AppResult<DailyTask> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("task title is empty".into()));
        }
        self.modify_task(id, |t| {
            t.title = title;
            Ok(())
        })
    }

    pub fn add_reminder(&self, id: i64, remind_at: i64, rule: RepeatRule) -> AppResult<DailyTask> {
        if remind_at <= 0 {
            return Err(AppError::Validation("reminder time must be positive".into()));
        }
        self.modify_task(id, |t| {
            t.reminders.push(Reminder {
                id: new_reminder_id(),
                remind_at,
                reminded_at: None,
                repeat_rule: rule,
            });
            Ok(())
        })
    }

    pub fn remove_reminder(&self, id: i64, reminder_id: &str) -> AppResult<DailyTask> {
        self.modify_task(id, |t| {
            let before = t.reminders.len();
            t.reminders.retain(|r| r.id != reminder_id);
            if t.reminders.len() == before {
                return Err(AppError::NotFound(format!("Reminder '{}'", reminder_id)));
            }
            Ok(())
        })
    }

    pub fn update_reminder(
        &self,
        id: i64,
        reminder_id: &str,
        patch: ReminderPatch,
    ) -> AppResult<DailyTask> {
        self.modify_task(id, |t| {
            let r = t
                .reminders
                .iter_mut()
                .find(|r| r.id == reminder_id)
                .ok_or_else(|| AppError::NotFound(format!("Reminder '{}'", reminder_id)))?;
            if let Some(at) = patch.remind_at.filter(|at| *at > 0) {
                r.remind_at = at;
            }
            if let Some(reminded) = patch.reminded_at {
                r.reminded_at = reminded;
            }
            if let Some(rule) = patch.repeat_rule {
                r.repeat_rule = rule;
            }
            Ok(())
        })
    }

    pub fn mark_reminded(&self, id: i64, reminder_id: &str, at: i64) -> AppResult<DailyTask> {
        self.update_reminder(
            id,
            reminder_id,
            ReminderPatch {
                reminded_at: Some(Some(at)),
                ..ReminderPatch::default()
            },
        )
    }

    pub fn delete_daily_task(&self, id: i64) -> AppResult<bool> {
        let tasks = self.daily_tasks()?;
        let next: Vec<DailyTask> = tasks.iter().filter(|t| t.id != id).cloned().collect();
        if next.len() == tasks.len() {
            return Ok(false);
        }
        self.save_daily_tasks(&next)?;
        Ok(true)
    }
}
