use crate::db::kv;
use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &mut DbPool) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(&pool.path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) MIGRATIONS
    //
    let versions = applied_versions(&pool.conn)?;
    println!(
        "{}• Migrations:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        versions.len(),
        RESET
    );
    if let Some(last) = versions.last() {
        println!("  {}last: {}{}", GREY, last, RESET);
    }

    //
    // 3) DOCUMENTS
    //
    let keys = kv::list_keys(&pool.conn)?;
    println!("{}• Documents:{} {}", CYAN, RESET, keys.len());
    for (key, size, updated) in keys {
        println!("  {:<20} {:>8} B  {}{}{}", key, size, GREY, updated, RESET);
    }

    println!();
    Ok(())
}
