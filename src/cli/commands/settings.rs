use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{Commands, SettingsAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::settings::Settings;
use crate::ui::messages::success;
use crate::utils::colors::{CYAN, RESET, colorize_optional};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Settings { action } = cmd else {
        return Ok(());
    };
    let store = open_store(cfg)?;

    match action {
        SettingsAction::Show { json } => {
            let settings = store.settings()?;
            if *json {
                return print_json(&settings);
            }
            for key in Settings::KEYS {
                let value = settings.get(key).unwrap_or("");
                println!("{}{:<20}{} {}", CYAN, key, RESET, colorize_optional(value));
            }
        }
        SettingsAction::Set { key, value } => {
            let settings = store.set_setting(key, value)?;
            success(format!(
                "{} = {}",
                key,
                settings.get(key).unwrap_or_default()
            ));
        }
    }
    Ok(())
}
