//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::Grade;

/// Command-line arguments for `mindmap-review`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mindmap-review",
    version,
    about = "Keep mind maps of your notes and review them with spaced repetition.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the SQLite database.
    ///
    /// If omitted, `MINDMAP_REVIEW_DB` or `db.sqlite3` is used.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MINDMAP_REVIEW_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a subject. Its first review is tomorrow.
    Add {
        title: String,
        #[arg(long, default_value = "")]
        context: String,
        /// Raw notes the mind map was built from.
        #[arg(long, default_value = "")]
        notes: String,
        /// JSON file holding the mind map tree.
        #[arg(long, value_name = "FILE")]
        mind_map: Option<PathBuf>,
    },
    /// List every subject with its next review date.
    List,
    /// Show the subjects due today.
    Today,
    /// Grade a review of one subject.
    Grade {
        id: i64,
        #[arg(value_parser = parse_grade)]
        grade: Grade,
    },
    /// Go through today's queue interactively.
    Review,
    /// Make a subject due right now.
    Reset { id: i64 },
    /// Delete a subject and its review data.
    Delete { id: i64 },
    /// Write all subjects to a JSON backup.
    Export { path: PathBuf },
    /// Add the subjects of a JSON backup.
    Import { path: PathBuf },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_grade(s: &str) -> Result<Grade, String> {
    s.parse().map_err(|e: crate::error::ParseGradeError| e.to_string())
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade_command() {
        let args = CliArgs::try_parse_from(["mindmap-review", "grade", "4", "Medium"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Grade {
                id: 4,
                grade: Grade::Medium
            }
        ));
    }

    #[test]
    fn test_unknown_grade_is_rejected() {
        assert!(CliArgs::try_parse_from(["mindmap-review", "grade", "4", "again"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["mindmap-review", "today", "--db", "x.sqlite3"]).unwrap();
        assert_eq!(args.db, Some(PathBuf::from("x.sqlite3")));
    }
}
