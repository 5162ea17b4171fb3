use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{Commands, ProjectAction, ProjectFields};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewProject, ProjectPatch};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;
use crate::utils::time::format_ms;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Project { action } = cmd else {
        return Ok(());
    };
    let store = open_store(cfg)?;

    match action {
        ProjectAction::Add { name, fields } => {
            let fields = fields.clone();
            let project = store.add_project(NewProject {
                name: name.clone(),
                kind: fields.kind.unwrap_or_default(),
                app_name: fields.app_name,
                app_type: fields.app_type.unwrap_or_default(),
                ref_link: fields.ref_link.unwrap_or_default(),
                mixed: fields.mixed.unwrap_or_default(),
            })?;
            success(format!("Project #{} '{}' added", project.id, project.name));
        }

        ProjectAction::List { json } => {
            let projects = store.projects()?;
            if *json {
                return print_json(&projects);
            }
            if projects.is_empty() {
                info("No projects yet (tgfarm project add <name>).");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Name", "Type", "App", "Ref", "Created"]);
            for p in &projects {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.kind.as_str().to_string(),
                    p.app_name.clone(),
                    colorize_optional(&p.ref_link),
                    format_ms(p.created_at),
                ]);
            }
            print!("{}", table.render());
        }

        ProjectAction::Edit { id, name, fields } => {
            let ProjectFields {
                kind,
                app_name,
                app_type,
                ref_link,
                mixed,
            } = fields.clone();
            let patch = ProjectPatch {
                name: name.clone(),
                kind,
                app_name,
                app_type,
                ref_link,
                mixed,
            };
            let project = store.update_project(*id, patch)?;
            success(format!("Project #{} '{}' updated", project.id, project.name));
        }

        ProjectAction::Del { id } => {
            if !store.delete_project(*id)? {
                return Err(AppError::NotFound(format!("Project #{}", id)));
            }
            store.add_log(&format!("Deleted project #{}", id))?;
            success(format!("Project #{} deleted", id));
        }
    }

    Ok(())
}
