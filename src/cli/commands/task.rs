use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{Commands, TaskAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::task::{DailyTask, ReminderPatch};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use crate::utils::time::{format_ms, parse_local};

fn print_tasks(tasks: &[DailyTask]) {
    for task in tasks {
        let (mark, color) = if task.is_completed {
            ("[x]", GREEN)
        } else {
            ("[ ]", RESET)
        };
        println!("{}{} #{} {}{}", color, mark, task.id, task.title, RESET);
        for r in &task.reminders {
            let fired = match r.reminded_at {
                Some(at) => format!("{} (fired {}){}", GREY, format_ms(at), RESET),
                None => String::new(),
            };
            let repeat = if r.repeat_rule.repeats() {
                format!(" ↻ {}", r.repeat_rule.as_str())
            } else {
                String::new()
            };
            println!(
                "      {}⏰ {}{}{} [{}]{}",
                YELLOW,
                format_ms(r.remind_at),
                RESET,
                repeat,
                r.id,
                fired
            );
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };
    let store = open_store(cfg)?;

    match action {
        TaskAction::Add { title, at } => {
            let remind_at = at.as_deref().map(parse_local).transpose()?;
            let task = store.add_daily_task(title, remind_at)?;
            success(format!("Task #{} '{}' added", task.id, task.title));
        }

        TaskAction::List { json } => {
            let tasks = store.daily_tasks()?;
            if *json {
                return print_json(&tasks);
            }
            if tasks.is_empty() {
                info("No daily tasks (tgfarm task add <title>).");
                return Ok(());
            }
            print_tasks(&tasks);
        }

        TaskAction::Done { id } => {
            store.toggle_daily_task(*id, true)?;
            success(format!("Task #{} done", id));
        }

        TaskAction::Undo { id } => {
            store.toggle_daily_task(*id, false)?;
            success(format!("Task #{} reopened", id));
        }

        TaskAction::Rename { id, title } => {
            let task = store.rename_daily_task(*id, title)?;
            success(format!("Task #{} renamed to '{}'", id, task.title));
        }

        TaskAction::Remind { id, at, repeat } => {
            let when = parse_local(at)?;
            let task = store.add_reminder(*id, when, *repeat)?;
            success(format!(
                "Reminder for '{}' set at {} ({})",
                task.title,
                format_ms(when),
                repeat.as_str()
            ));
        }

        TaskAction::Reschedule {
            id,
            reminder_id,
            at,
            repeat,
        } => {
            let patch = ReminderPatch {
                remind_at: at.as_deref().map(parse_local).transpose()?,
                reminded_at: Some(None),
                repeat_rule: *repeat,
            };
            store.update_reminder(*id, reminder_id, patch)?;
            success(format!("Reminder {} rescheduled", reminder_id));
        }

        TaskAction::Unremind { id, reminder_id } => {
            store.remove_reminder(*id, reminder_id)?;
            success(format!("Reminder {} removed", reminder_id));
        }

        TaskAction::Del { id } => {
            if !store.delete_daily_task(*id)? {
                return Err(AppError::NotFound(format!("Task #{}", id)));
            }
            success(format!("Task #{} deleted", id));
        }
    }

    Ok(())
}
