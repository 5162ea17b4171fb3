use crate::cli::commands::open_store;
use crate::cli::parser::{AuthAction, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::user::User;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Auth { action } = cmd else {
        return Ok(());
    };
    let store = open_store(cfg)?;

    match action {
        AuthAction::Login { id, name, username } => {
            let user = User {
                id: id.trim().to_string(),
                name: name.trim().to_string(),
                username: username
                    .as_deref()
                    .map(|u| u.trim().trim_start_matches('@').to_string())
                    .filter(|u| !u.is_empty()),
            };
            store.save_auth_user(&user)?;
            success(format!("Logged in as {}", user.name));
        }
        AuthAction::Logout => {
            store.clear_auth_user()?;
            success("Logged out");
        }
        AuthAction::Whoami => match store.auth_user()? {
            Some(user) => match &user.username {
                Some(u) => println!("{} (@{}) [{}]", user.name, u, user.id),
                None => println!("{} [{}]", user.name, user.id),
            },
            None => {
                info("Not logged in (tgfarm auth login <id> <name>).");
                if !store.auth_onboarding_seen()? {
                    info("First run: scan your profiles with `tgfarm account scan`.");
                }
            }
        },
        AuthAction::Onboarding { reset } => {
            store.set_auth_onboarding_seen(!reset)?;
            success(if *reset {
                "Onboarding hint re-enabled"
            } else {
                "Onboarding hint dismissed"
            });
        }
    }
    Ok(())
}
