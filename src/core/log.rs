use crate::errors::AppResult;
use crate::models::log_entry::LogEntry;
use crate::store::Store;
use crate::utils::time::format_time_ms;
use ansi_term::Colour;

/// Colour by the leading verb of the message.
fn color_for_message(message: &str) -> Colour {
    let verb = message.split_whitespace().next().unwrap_or("");
    match verb.trim_end_matches(':') {
        "Launched" => Colour::Green,
        "Launch" => Colour::Yellow,
        "Closed" | "Deleted" => Colour::Red,
        "Reminder" => Colour::Blue,
        "Scanned" => Colour::Purple,
        "Backup" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Keep the first 60 visible characters.
fn truncate(message: &str) -> String {
    if message.chars().count() > 60 {
        let mut s: String = message.chars().take(57).collect();
        s.push_str("...");
        s
    } else {
        message.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn render(entries: &[LogEntry], full: bool) -> Vec<String> {
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        entries
            .iter()
            .map(|e| {
                let text = if full {
                    e.message.clone()
                } else {
                    truncate(&e.message)
                };
                let (head, rest) = match text.split_once(' ') {
                    Some((h, r)) => (h.to_string(), format!(" {}", r)),
                    None => (text.clone(), String::new()),
                };
                format!(
                    "{:>id_w$}: {} | {}{}",
                    e.id,
                    format_time_ms(e.timestamp),
                    color_for_message(&text).paint(head),
                    rest,
                    id_w = id_w
                )
            })
            .collect()
    }

    pub fn print_log(store: &Store, limit: Option<usize>, full: bool) -> AppResult<()> {
        let mut entries = store.logs()?;
        if let Some(n) = limit {
            entries.truncate(n);
        }

        if entries.is_empty() {
            println!("📜 Activity log is empty.");
            return Ok(());
        }

        println!("📜 Activity log (last 24h):\n");
        for line in Self::render(&entries, full) {
            println!("{}", line);
        }
        Ok(())
    }
}
