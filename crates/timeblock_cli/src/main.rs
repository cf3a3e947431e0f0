//! Command-line front end for `timeblock_core`.
//!
//! # Responsibility
//! - Load JSON snapshots from disk, run the core, print JSON results.
//! - Provide a version probe for checking core linkage.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use timeblock_core::{
    assign_column_slots, core_version, default_log_level, distribute, init_logging,
    merge_task_scopes, parse_blocks, parse_tasks_json, replace_time_range, BoardMode,
    DistributeOptions, NotePayload, OverlapColumnInfo, ScheduledBlock, TimeblockSettings,
    UnscheduledTask, WeekStart,
};

#[derive(Debug, Parser)]
#[command(
    name = "timeblock",
    about = "Timeblock parsing and Kanban tooling for Craft notes",
    version
)]
struct Cli {
    /// Settings JSON file; defaults apply when omitted or missing.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Write rolling log files to this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the core library version.
    Version,

    /// Parse a note payload into scheduled blocks and tasks.
    Parse(ParseArgs),

    /// Distribute a task list into Kanban columns.
    Board(BoardArgs),

    /// Rewrite the time range of one note line.
    Retime(RetimeArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Note payload JSON (block tree, block list, or legacy string).
    payload: PathBuf,
}

#[derive(Debug, Args)]
struct BoardArgs {
    /// Task list JSON files (array or `{ "items": [...] }`), merged by id.
    #[arg(required = true)]
    tasks: Vec<PathBuf>,
    /// Reference day (YYYY-MM-DD). Defaults to the local date.
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Show one column per day of the week.
    #[arg(long)]
    week: bool,
    /// Start weeks on Sunday regardless of settings.
    #[arg(long)]
    sunday_first: bool,
}

#[derive(Debug, Args)]
struct RetimeArgs {
    /// Original note line.
    line: String,
    /// New start as a decimal hour, e.g. 9.5.
    start: f64,
    /// New end as a decimal hour.
    end: f64,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    scheduled: &'a [ScheduledBlock],
    unscheduled: &'a [UnscheduledTask],
    /// Parallel to `scheduled`.
    overlap: Vec<OverlapColumnInfo>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    start_logging(cli.log_dir.as_deref(), cli.log_level.as_deref())?;
    let settings = match cli.settings.as_deref() {
        Some(path) => TimeblockSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => TimeblockSettings::default(),
    };

    match cli.command {
        Commands::Version => {
            println!("timeblock_core version={}", core_version());
            Ok(())
        }
        Commands::Parse(args) => handle_parse(args, &settings),
        Commands::Board(args) => handle_board(args, &settings),
        Commands::Retime(args) => handle_retime(args),
    }
}

fn start_logging(log_dir: Option<&Path>, level: Option<&str>) -> Result<()> {
    let Some(dir) = log_dir else {
        return Ok(());
    };
    let dir = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to resolve current directory")?
            .join(dir)
    };
    let level = level.unwrap_or_else(|| default_log_level().as_str());
    init_logging(level, &dir).context("failed to start logging")
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

fn handle_parse(args: ParseArgs, settings: &TimeblockSettings) -> Result<()> {
    let raw = read_input(&args.payload)?;
    let payload = NotePayload::from_json_str(&raw)
        .with_context(|| format!("invalid note payload in {}", args.payload.display()))?;
    let parsed = parse_blocks(&payload);

    let visible = f64::from(settings.start_hour)..f64::from(settings.end_hour);
    let outside = parsed
        .scheduled
        .iter()
        .filter(|block| !visible.contains(&block.start))
        .count();
    info!(
        "event=cli_parse module=cli status=ok scheduled={} unscheduled={} outside_visible={}",
        parsed.scheduled.len(),
        parsed.unscheduled.len(),
        outside
    );

    print_json(&ParseOutput {
        scheduled: &parsed.scheduled,
        unscheduled: &parsed.unscheduled,
        overlap: assign_column_slots(&parsed.scheduled),
    })
}

fn handle_board(args: BoardArgs, settings: &TimeblockSettings) -> Result<()> {
    let scopes = args
        .tasks
        .iter()
        .map(|path| {
            let raw = read_input(path)?;
            parse_tasks_json(&raw)
                .with_context(|| format!("invalid task list in {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let tasks = merge_task_scopes(&scopes);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let options = if args.week {
        let week_start = if args.sunday_first {
            WeekStart::Sunday
        } else {
            settings.week_start()
        };
        DistributeOptions::week(week_start)
    } else {
        if args.sunday_first {
            bail!("--sunday-first requires --week");
        }
        DistributeOptions::standard()
    };

    let columns = distribute(&tasks, today, &options);
    info!(
        "event=cli_board module=cli status=ok week={} scopes={} tasks={} columns={}",
        options.mode == BoardMode::Week,
        scopes.len(),
        tasks.len(),
        columns.len()
    );
    print_json(&columns)
}

/// Hours accepted by `retime`; 24 would be written back as `12am`.
fn is_clock_hour(hour: f64) -> bool {
    (0.0..24.0).contains(&hour)
}

fn handle_retime(args: RetimeArgs) -> Result<()> {
    if !is_clock_hour(args.start) || !is_clock_hour(args.end) {
        bail!(
            "start and end must be decimal hours within [0, 24), got {} and {}",
            args.start,
            args.end
        );
    }
    println!("{}", replace_time_range(&args.line, args.start, args.end));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::is_clock_hour;

    #[test]
    fn retime_accepts_only_hours_of_one_day() {
        assert!(is_clock_hour(0.0));
        assert!(is_clock_hour(23.75));
        assert!(!is_clock_hour(24.0));
        assert!(!is_clock_hour(-0.5));
        assert!(!is_clock_hour(f64::NAN));
    }
}
