//! Command-line entry point.
//!
//! # Responsibility
//! - Record tasks, notes, journal entries and mood check-ins.
//! - Print dashboard snapshots for a range preset as JSON.
//!
//! # Invariants
//! - All output on stdout is JSON, except `version`.
//! - Logs never go to stdout.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use lifelog_core::{
    core_version, init_logging, AnalyticsAggregator, Clock, CoreConfig, EntryService,
    JournalDraft, RangePreset, RecordKind, SqliteRecordStore, SystemClock, TaskPriority,
};
use log::debug;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_DB_FILE_NAME: &str = "lifelog.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "lifelog", version, about = "Personal tasks, notes, journal and mood log")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "LIFELOG_CONFIG")]
    config: Option<PathBuf>,

    /// Database file; overrides `db_path` from the configuration.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the core version.
    Version,
    /// Print the analytics snapshot for a range preset.
    Snapshot {
        #[arg(long, default_value = "week")]
        preset: RangePreset,
        #[arg(long)]
        pretty: bool,
    },
    #[command(subcommand)]
    Task(TaskCommand),
    #[command(subcommand)]
    Note(NoteCommand),
    #[command(subcommand)]
    Journal(JournalCommand),
    #[command(subcommand)]
    Mood(MoodCommand),
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    Add {
        title: String,
        #[arg(long, default_value = "medium", value_parser = parse_priority)]
        priority: TaskPriority,
    },
    Complete {
        id: Uuid,
    },
    Reopen {
        id: Uuid,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    Add { content: String },
    Delete { id: Uuid },
}

#[derive(Debug, Subcommand)]
enum JournalCommand {
    Add {
        content: String,
        #[arg(long)]
        dream: bool,
        /// Repeat for each gratitude line.
        #[arg(long = "gratitude")]
        gratitude: Vec<String>,
        #[arg(long)]
        prompt: Option<String>,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
enum MoodCommand {
    Log {
        rating: u8,
        #[arg(long)]
        note: Option<String>,
    },
    Delete {
        id: Uuid,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if matches!(cli.command, Command::Version) {
        println!("lifelog_core version={}", core_version());
        return Ok(());
    }

    let config = match cli.config.as_ref() {
        Some(path) => CoreConfig::load(path)
            .with_context(|| format!("loading config `{}`", path.display()))?,
        None => CoreConfig::default(),
    };
    init_logging(&config.log).map_err(|err| anyhow!(err))?;

    let db_path = cli
        .db
        .clone()
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
    debug!("event=cli_start module=cli status=ok");
    let store = SqliteRecordStore::open(&db_path)
        .with_context(|| format!("opening database `{}`", db_path.display()))?;
    let clock = Arc::new(SystemClock);

    match cli.command {
        Command::Version => Ok(()),
        Command::Snapshot { preset, pretty } => {
            let host_offset_minutes = Local::now().offset().local_minus_utc() / 60;
            let calendar = config.calendar(host_offset_minutes)?;
            let range = preset.range_ending_at(clock.now_ms(), &calendar);
            let snapshot = AnalyticsAggregator::new(&store, calendar, clock).compute(range);
            print_json(&snapshot, pretty)
        }
        command => {
            let service = EntryService::new(&store, config.mood_scale()?);
            run_entry_command(&service, command, clock.now_ms())
        }
    }
}

fn run_entry_command(
    service: &EntryService<&SqliteRecordStore>,
    command: Command,
    now_ms: i64,
) -> Result<()> {
    match command {
        Command::Task(TaskCommand::Add { title, priority }) => {
            print_json(&service.create_task(title, priority, now_ms)?, false)
        }
        Command::Task(TaskCommand::Complete { id }) => {
            print_json(&service.complete_task(id, now_ms)?, false)
        }
        Command::Task(TaskCommand::Reopen { id }) => print_json(&service.reopen_task(id)?, false),
        Command::Task(TaskCommand::Delete { id }) => delete(service, RecordKind::Task, id),
        Command::Note(NoteCommand::Add { content }) => {
            print_json(&service.create_note(content, now_ms)?, false)
        }
        Command::Note(NoteCommand::Delete { id }) => delete(service, RecordKind::Note, id),
        Command::Journal(JournalCommand::Add {
            content,
            dream,
            gratitude,
            prompt,
        }) => {
            let draft = JournalDraft {
                content,
                is_dream: dream,
                gratitude_entries: gratitude,
                prompt,
            };
            print_json(&service.create_journal_entry(draft, now_ms)?, false)
        }
        Command::Journal(JournalCommand::Delete { id }) => {
            delete(service, RecordKind::JournalEntry, id)
        }
        Command::Mood(MoodCommand::Log { rating, note }) => {
            print_json(&service.log_mood(rating, note, now_ms)?, false)
        }
        Command::Mood(MoodCommand::Delete { id }) => delete(service, RecordKind::MoodEntry, id),
        Command::Version | Command::Snapshot { .. } => Ok(()),
    }
}

#[derive(Serialize)]
struct Deleted {
    kind: RecordKind,
    id: Uuid,
}

fn delete(service: &EntryService<&SqliteRecordStore>, kind: RecordKind, id: Uuid) -> Result<()> {
    service.delete(kind, id)?;
    print_json(&Deleted { kind, id }, false)
}

fn print_json(value: &impl Serialize, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn parse_priority(value: &str) -> Result<TaskPriority, String> {
    TaskPriority::parse(value)
        .ok_or_else(|| format!("unsupported priority `{value}`; expected low|medium|high"))
}
