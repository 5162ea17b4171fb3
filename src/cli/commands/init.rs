use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    // 1️⃣ config + database location
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    if !cli.quiet {
        println!("⚙️  Initializing tgfarm…");
        if !cli.test {
            println!("📄 Config file : {}", Config::config_file().display());
        }
        println!("🗄️  Database   : {}", db_path);
    }

    // 2️⃣ open + migrate
    let store = Store::open(&db_path)?;
    success(format!("Database initialized at {}", db_path));

    // 3️⃣ activity log (non blocking)
    if let Err(e) = store.add_log("Database initialized") {
        warning(format!("Failed to write activity log: {}", e));
    }

    Ok(())
}
