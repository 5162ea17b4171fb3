use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::store::Store;
use crate::utils::path::expand_tilde;
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally as a `.zip`.
    /// Returns the path that was written.
    pub fn backup(
        store: &Store,
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(db_path);
        let dest_buf = expand_tilde(dest_file);
        let dest = dest_buf.as_path();

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(AppError::NotFound(format!("Database {}", src.display())));
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_target, force)?;

        // 3️⃣ Copy or compress
        let final_path = if compress {
            compress_into(src, &final_target)?
        } else {
            fs::copy(src, dest)?;
            dest.to_path_buf()
        };
        success(format!("Backup created: {}", final_path.display()));

        // 4️⃣ Activity log (non blocking)
        if let Err(e) = store.add_log(&format!("Backup created: {}", final_path.display())) {
            warning(format!("Failed to write activity log: {}", e));
        }

        Ok(final_path)
    }
}

/// Write `src` into a deflated zip at `zip_path`.
fn compress_into(src: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "tgfarm.sqlite".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path.to_path_buf())
}
