pub mod checklist;
pub mod dates;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dates::{parse_day, DateStyle};
use output::{render_day, render_habits, render_streak, OutputStyle};
use tracing::level_filters::LevelFilter;

use crate::{
    habits::Checklist,
    storage::record_storage::{CsvRecordStorage, RecordStorage},
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "habitual", version, long_about = None)]
#[command(about = "Daily habit checklist with a score and a streak", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Enable logging. Logs are also written into $XDG_STATE_HOME/habitual/logs or $HOME/.local/state/habitual/logs"
    )]
    log: bool,
    #[arg(long, global = true, help = "Disable colours")]
    plain: bool,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Creates an empty data file in the current directory")]
    Init {},
    #[command(about = "List tracked habits with their ids and positions")]
    Habits {},
    #[command(about = "Show the checklist of a day with its score and the current streak")]
    Show {
        #[arg(
            long,
            short,
            help = "Day to show. Examples are \"2024-01-02\", \"yesterday\", \"3 days ago\", \"15/03/2025\""
        )]
        date: Option<String>,
        #[arg(long, help = "Print as json")]
        json: bool,
    },
    #[command(
        about = "Save the checklist of a day. Listed items are marked as done, everything else as not done"
    )]
    Save {
        #[arg(help = "Habit ids or positions from 1 to 20")]
        items: Vec<String>,
        #[arg(long, short, help = "Day to save. Defaults to today")]
        date: Option<String>,
        #[arg(long, help = "Print as json")]
        json: bool,
    },
    #[command(about = "Number of consecutive saved days ending at a day")]
    Streak {
        #[arg(long, short, help = "Last day of the streak. Defaults to today")]
        date: Option<String>,
        #[arg(long, help = "Print as json")]
        json: bool,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let (log_dir, logging_level) = if args.log {
        (
            Some(create_application_default_path()?.join("logs")),
            Some(LevelFilter::TRACE),
        )
    } else {
        (None, None)
    };
    enable_logging(CLI_PREFIX, log_dir.as_deref(), logging_level)?;

    let storage = CsvRecordStorage::in_working_dir();
    let clock = DefaultClock;
    let style = OutputStyle::new(args.plain);
    let today = clock.today();

    match args.commands {
        Commands::Init {} => {
            storage.ensure_exists().await?;
            println!("Data file {}", storage.path().display());
            Ok(())
        }
        Commands::Habits {} => {
            print!("{}", render_habits(style)?);
            Ok(())
        }
        Commands::Show { date, json } => {
            let date = parse_day(date.as_deref(), args.date_style, today)?;
            let (report, checklist) = checklist::show_day(&storage, &clock, date).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_day(&report, &checklist, style)?);
            }
            Ok(())
        }
        Commands::Save { items, date, json } => {
            let date = parse_day(date.as_deref(), args.date_style, today)?;
            let selection = Checklist::from_selection(&items)?;
            let (report, checklist) =
                checklist::save_day(&storage, &clock, date, &selection).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_day(&report, &checklist, style)?);
                if let Some(message) = report.message {
                    println!();
                    println!("{message}");
                }
            }
            Ok(())
        }
        Commands::Streak { date, json } => {
            let date = parse_day(date.as_deref(), args.date_style, today)?;
            let report = checklist::streak_at(&storage, date).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_streak(report.streak, style));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Args, Commands};

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_save() {
        let args = Args::try_parse_from([
            "habitual",
            "save",
            "fajr",
            "12",
            "--date",
            "yesterday",
            "--plain",
        ])
        .unwrap();
        assert!(args.plain);
        match args.commands {
            Commands::Save { items, date, json } => {
                assert_eq!(items, vec!["fajr".to_string(), "12".to_string()]);
                assert_eq!(date.as_deref(), Some("yesterday"));
                assert!(!json);
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }
}
