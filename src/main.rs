use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use mindmap_review::cli::{self, CliArgs, Command};
use mindmap_review::config::Config;
use mindmap_review::export::json::{export_subjects_to_path, import_subjects, restore_subjects};
use mindmap_review::models::{Grade, MindMapNode, ReviewSession, SubjectDraft};
use mindmap_review::{Planner, SqliteSubjectStore, logging};
use std::fs;
use std::io::{self, BufRead, Write};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("mindmap-review error: {err:?}");
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let config = Config::resolve(args.db);
    let store = SqliteSubjectStore::open(&config.database_path).with_context(|| {
        format!(
            "failed to open database at {}",
            config.database_path.display()
        )
    })?;
    let planner = Planner::new(store);
    let now = Local::now();

    match args.command {
        Command::Add {
            title,
            context,
            notes,
            mind_map,
        } => {
            let mind_map = match mind_map {
                Some(path) => {
                    let json = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Some(serde_json::from_str::<MindMapNode>(&json)?)
                }
                None => None,
            };
            let draft = SubjectDraft {
                title,
                context,
                raw_notes: notes,
                mind_map,
            };
            let subject = planner.create_subject(&draft, &now)?;
            println!(
                "Subject #{} '{}' created, first review on {}",
                subject.id,
                subject.title,
                format_day(subject.review.next_review_at)
            );
        }
        Command::List => {
            let subjects = planner.subjects()?;
            println!("{} subjects", subjects.len());
            for subject in &subjects {
                println!(
                    "  #{:<4} {:<32} next review {}  (EF {:.2}, {} reps)",
                    subject.id,
                    subject.title,
                    format_day(subject.review.next_review_at),
                    subject.review.ease_factor,
                    subject.review.repetitions
                );
            }
        }
        Command::Today => {
            let due = planner.today(&now)?;
            if due.is_empty() {
                println!("Nothing to review today.");
            }
            for item in &due {
                let badge = if item.overdue_days == 0 {
                    "due today".to_string()
                } else {
                    format!("{} days late", item.overdue_days)
                };
                println!("  #{:<4} {:<32} {}", item.subject.id, item.subject.title, badge);
            }
        }
        Command::Grade { id, grade } => {
            let state = planner.grade(id, grade, &now)?;
            println!(
                "Graded '{}': next review in {} days, on {}",
                grade,
                state.last_interval,
                format_day(state.next_review_at)
            );
        }
        Command::Review => review_interactively(&planner, &now)?,
        Command::Reset { id } => {
            planner.reset_for_review(id, &now)?;
            println!("Subject #{id} is due now.");
        }
        Command::Delete { id } => {
            planner.delete_subject(id)?;
            println!("Subject #{id} deleted.");
        }
        Command::Export { path } => {
            let subjects = planner.subjects()?;
            export_subjects_to_path(&subjects, &path)?;
            println!("{} subjects exported to {}", subjects.len(), path.display());
        }
        Command::Import { path } => {
            let subjects = import_subjects(&path)?;
            let restored = restore_subjects(planner.repository(), &subjects)?;
            println!("{} subjects imported from {}", restored.len(), path.display());
        }
    }

    Ok(())
}

fn review_interactively(
    planner: &Planner<SqliteSubjectStore>,
    now: &DateTime<Local>,
) -> Result<()> {
    let mut session = ReviewSession::start(planner, now)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_completed() {
        let Some(entry) = session.current() else {
            break;
        };
        println!();
        println!("{}", session.phase_message());
        println!("#{} {}", entry.subject.id, entry.subject.title);
        if !entry.subject.context.is_empty() {
            println!("({})", entry.subject.context);
        }
        print!("Press enter to show the mind map ");
        io::stdout().flush()?;
        if lines.next().transpose()?.is_none() {
            break;
        }

        session.toggle_mind_map();
        if let Some(entry) = session.current() {
            print!("{}", entry.subject.mind_map.outline());
        }

        let grade = loop {
            print!("How was it? [easy/medium/hard] ");
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            match line.parse::<Grade>() {
                Ok(grade) => break grade,
                Err(err) => println!("{err}"),
            }
        };

        session.grade_current(grade, now)?;
        session.next_subject();
    }

    println!("Review finished: {} subjects reviewed.", session.entries.len());
    Ok(())
}

/// Formats a review date as YYYY-MM-DD in local time
fn format_day(at: Option<DateTime<chrono::Utc>>) -> String {
    match at {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}
