//! Runtime configuration.
//!
//! Priority for the database location:
//! 1. `--db` CLI flag (if provided)
//! 2. `MINDMAP_REVIEW_DB` environment variable
//! 3. `db.sqlite3` in the current directory

use std::path::PathBuf;

pub const DB_ENV: &str = "MINDMAP_REVIEW_DB";
pub const LOG_ENV: &str = "MINDMAP_REVIEW_LOG";
pub const DEFAULT_DB_PATH: &str = "db.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    pub fn resolve(cli_db: Option<PathBuf>) -> Self {
        Self::resolve_with(cli_db, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve`] with an explicit environment lookup.
    pub fn resolve_with<F>(cli_db: Option<PathBuf>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = cli_db
            .or_else(|| {
                env(DB_ENV)
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        Self { database_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(db: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| (key == DB_ENV).then_some(db).flatten().map(str::to_string)
    }

    #[test]
    fn test_cli_flag_wins() {
        let config = Config::resolve_with(Some(PathBuf::from("cli.db")), env_with(Some("env.db")));
        assert_eq!(config.database_path, PathBuf::from("cli.db"));
    }

    #[test]
    fn test_env_used_without_flag() {
        let config = Config::resolve_with(None, env_with(Some("env.db")));
        assert_eq!(config.database_path, PathBuf::from("env.db"));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            Config::resolve_with(None, env_with(None)).database_path,
            PathBuf::from(DEFAULT_DB_PATH)
        );
        assert_eq!(
            Config::resolve_with(None, env_with(Some("  "))).database_path,
            PathBuf::from(DEFAULT_DB_PATH)
        );
    }
}
