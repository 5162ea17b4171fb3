use std::env;
use std::fs;
use tgfarm::config::Config;
use tgfarm::errors::AppError;

fn temp_conf(name: &str, content: Option<&str>) -> std::path::PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}_tgfarm.conf", name));
    fs::remove_file(&path).ok();
    if let Some(c) = content {
        fs::write(&path, c).unwrap();
    }
    path
}

#[test]
fn missing_file_gives_defaults() {
    let path = temp_conf("cfg_missing", None);
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.poll_interval_secs, 5);
    assert_eq!(cfg.poll_max_backoff_secs, 60);
    assert_eq!(cfg.reminder_interval_secs, 15);
    assert!(cfg.database.ends_with("tgfarm.sqlite"));
}

#[test]
fn partial_file_fills_defaults() {
    let path = temp_conf("cfg_partial", Some("database: /data/farm.sqlite\npoll_interval_secs: 2\n"));
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.database, "/data/farm.sqlite");
    assert_eq!(cfg.poll_interval_secs, 2);
    assert_eq!(cfg.reminder_interval_secs, 15);

    let yaml = cfg.to_yaml().unwrap();
    assert!(yaml.contains("poll_max_backoff_secs: 60"));
}

#[test]
fn malformed_file_is_a_config_error() {
    let path = temp_conf("cfg_bad", Some("database: [unclosed\n"));
    assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
}

#[test]
fn test_mode_init_only_prepares_db_dir() {
    let mut dir = env::temp_dir();
    dir.push("tgfarm_init_test_dir");
    fs::remove_dir_all(&dir).ok();
    let db = dir.join("nested").join("farm.sqlite");

    let out = Config::init_all(Some(db.to_str().unwrap()), true).unwrap();
    assert_eq!(out, db);
    assert!(db.parent().unwrap().is_dir());
}
