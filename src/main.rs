use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use log::debug;
use serde::Serialize;

use wuzzle_stats::helpers::{format_time, format_time_f64, Capitalize};
use wuzzle_stats::model::{DerivedStats, GameMode, GameRecord, StatsKey};
use wuzzle_stats::settings::Settings;
use wuzzle_stats::stats::calculate_streaks;
use wuzzle_stats::store::{FilePersistence, StatsStore, TrackOutcome};

#[derive(Debug, Parser)]
#[command(name = "wuzzle-stats")]
#[command(about = "Record Wuzzle games and report statistics", long_about = None)]
struct Cli {
    /// Directory holding stats.json (defaults to the settings file's choice)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    user: Option<String>,

    /// Save --user and --data-dir to the settings file for later runs
    #[arg(long, global = true)]
    remember: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct KeyArgs {
    #[arg(long, default_value = "daily")]
    mode: GameMode,

    #[arg(long)]
    speedrun: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store one finished game
    Record {
        #[command(flatten)]
        key: KeyArgs,

        #[arg(long, default_value_t = 1)]
        boards: u8,

        #[arg(
            long,
            required_unless_present_any = ["failed", "total_guesses"],
            value_parser = clap::value_parser!(u32).range(1..=6)
        )]
        guesses: Option<u32>,

        #[arg(long, conflicts_with_all = ["guesses", "total_guesses"])]
        failed: bool,

        /// Guesses across a whole marathon run
        #[arg(
            long,
            requires = "full_marathon",
            conflicts_with = "guesses",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        total_guesses: Option<u32>,

        #[arg(long)]
        time_ms: Option<u64>,

        /// Puzzle date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, requires = "stage_boards")]
        stage: Option<u8>,

        #[arg(long, requires = "stage")]
        stage_boards: Option<u8>,

        #[arg(long, conflicts_with = "stage")]
        full_marathon: bool,
    },
    /// Full statistics for one mode
    Report {
        #[command(flatten)]
        key: KeyArgs,

        #[arg(long)]
        json: bool,
    },
    /// Marathon statistics per stage
    Stages {
        #[arg(long)]
        speedrun: bool,

        #[arg(long)]
        json: bool,
    },
    /// Marathon whole-run summary
    Marathon {
        #[arg(long)]
        speedrun: bool,

        #[arg(long)]
        json: bool,
    },
    /// Running aggregate for one mode
    Aggregate {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Daily streaks
    Streak {
        #[arg(long)]
        speedrun: bool,
    },
}

fn init_logging() {
    let default_filter = if Settings::is_debug_mode() { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("failed to serialize report")?);
    Ok(())
}

fn print_derived(title: &str, stats: &DerivedStats) {
    println!("{}", title);
    println!("  Played:        {}", stats.total_games);
    println!("  Solved:        {} ({}%)", stats.solved_games, stats.win_rate);
    println!("  Avg guesses:   {}", stats.average_guesses);
    println!("  Median:        {}", stats.median_guesses);
    println!(
        "  Best / worst:  {} / {}",
        stats.best_performance.map_or("-".to_string(), |g| g.to_string()),
        stats.worst_performance.map_or("-".to_string(), |g| g.to_string())
    );
    println!(
        "  Perfect:       {} ({}%)",
        stats.perfect_games, stats.perfect_games_percentage
    );
    println!(
        "  In 3 or fewer: {} ({}%)",
        stats.games_solved_in_3_or_fewer, stats.games_solved_in_3_or_fewer_percentage
    );
    println!(
        "  In 4 or fewer: {} ({}%)",
        stats.games_solved_in_4_or_fewer, stats.games_solved_in_4_or_fewer_percentage
    );
    println!("  Distribution:");
    let widest = stats
        .guess_distribution
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0)
        .max(1);
    for (guesses, count) in stats.guess_distribution.iter() {
        let bar = "#".repeat((*count as usize * 30).div_ceil(widest as usize));
        println!("    {} | {:<30} {}", guesses, bar, count);
    }
    if stats.fastest_time_ms.is_some() {
        println!("  Avg time:      {}", format_time_f64(stats.average_time_ms));
        println!("  Median time:   {}", format_time_f64(stats.median_time_ms));
        println!("  Fastest:       {}", format_time(stats.fastest_time_ms));
        println!("  Slowest:       {}", format_time(stats.slowest_time_ms));
        println!(
            "  Under 30s/60s/120s: {}/{}/{} ({}%/{}%/{}%)",
            stats.sub_30_count,
            stats.sub_60_count,
            stats.sub_120_count,
            stats.sub_30_percentage,
            stats.sub_60_percentage,
            stats.sub_120_percentage
        );
        for (guesses, avg) in stats.avg_time_ms_by_guesses.iter() {
            println!("    {} guesses: {}", guesses, format_time(*avg));
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }
    if let Some(user) = cli.user {
        settings.user_id = Some(user);
    }
    debug!(target: "cli", "Using settings {:?}", settings);
    if cli.remember {
        settings.save().context("failed to save settings")?;
        debug!(target: "cli", "Saved settings under {}", Settings::config_dir().display());
    }

    let store_path = settings.store_path();
    let persistence = FilePersistence::open(&store_path, settings.pretty_json)
        .with_context(|| format!("failed to open store: {}", store_path.display()))?;
    let mut store = StatsStore::new(persistence);
    if let Some(user) = &settings.user_id {
        store.set_user(user.clone());
    }

    match cli.command {
        Command::Record {
            key,
            boards,
            guesses,
            failed,
            total_guesses,
            time_ms,
            date,
            stage,
            stage_boards,
            full_marathon,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let timestamp = Utc::now().timestamp_millis();
            let mut record = match (failed, guesses.or(total_guesses)) {
                (false, Some(guesses)) => GameRecord::solved(date, guesses, timestamp),
                _ => GameRecord::failed(date, timestamp),
            };
            if let Some(ms) = time_ms {
                record = record.with_solve_time(ms);
            }
            if let (Some(index), Some(boards)) = (stage, stage_boards) {
                record = record.with_stage(index, boards);
            }
            if full_marathon {
                record = record.as_full_marathon();
            }

            let stats_key = StatsKey::for_mode(key.mode, key.speedrun);
            match store.save(key.mode, key.speedrun, boards, record) {
                TrackOutcome::Recorded => println!("Recorded {} game", stats_key),
                TrackOutcome::Untracked => {
                    println!("{}-board daily games are not tracked", boards)
                }
                TrackOutcome::NoUser => println!("No user set; nothing recorded"),
                TrackOutcome::Rejected => bail!("solved {} game needs 1 to 6 guesses", stats_key),
                TrackOutcome::Failed => bail!("failed to record {} game", stats_key),
            }
        }
        Command::Report { key, json } => {
            let stats_key = StatsKey::for_mode(key.mode, key.speedrun);
            let Some(stats) = store.calculate_advanced_stats(key.mode, key.speedrun) else {
                bail!("failed to load {} records", stats_key);
            };
            if json {
                print_json(&stats)?;
            } else {
                let title = format!(
                    "{} ({})",
                    key.mode.as_str().capitalize(),
                    stats_key.variant.as_str()
                );
                print_derived(&title, &stats);
            }
        }
        Command::Stages { speedrun, json } => {
            let Some(stats) = store.calculate_marathon_stage_stats(speedrun) else {
                bail!("failed to load marathon stages");
            };
            if json {
                print_json(&stats)?;
            } else {
                for (boards, stage) in &stats.by_stage {
                    print_derived(&format!("Stage with {} board(s)", boards), stage);
                }
                println!("Solved stages: {}", stats.totals.total_stages);
            }
        }
        Command::Marathon { speedrun, json } => {
            let Some(summary) = store.calculate_marathon_summary_from_games(speedrun) else {
                bail!("failed to load marathon runs");
            };
            if json {
                print_json(&summary)?;
            } else {
                println!("Marathon runs: {}", summary.total_runs);
                println!("  Avg guesses:  {}", summary.average_guesses);
                println!(
                    "  Best / worst: {} / {}",
                    summary.best_guesses.map_or("-".to_string(), |g| g.to_string()),
                    summary.worst_guesses.map_or("-".to_string(), |g| g.to_string())
                );
                if speedrun {
                    println!("  Avg time:     {}", format_time_f64(summary.average_time_ms));
                    println!("  Median time:  {}", format_time_f64(summary.median_time_ms));
                    println!("  Fastest:      {}", format_time(summary.fastest_time_ms));
                    println!("  Slowest:      {}", format_time(summary.slowest_time_ms));
                }
            }
        }
        Command::Aggregate { key } => match store.load_aggregate(key.mode, key.speedrun) {
            Some(aggregate) => print_json(&aggregate)?,
            None => println!("No aggregate for {}", StatsKey::for_mode(key.mode, key.speedrun)),
        },
        Command::Streak { speedrun } => {
            let Some(records) = store.load_all(GameMode::Daily, speedrun) else {
                bail!("failed to load daily records");
            };
            let streaks = calculate_streaks(&records, Local::now().date_naive());
            println!("Current streak: {}", streaks.current_streak);
            println!("Max streak:     {}", streaks.max_streak);
        }
    }

    Ok(())
}
