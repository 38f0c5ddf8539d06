pub mod heatmap;
pub mod input;
pub mod output;
pub mod records;
pub mod week;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use heatmap::{process_heatmap_command, HeatmapCommand};
use records::{
    process_parse_command, process_records_command, process_weeks_command, ParseCommand,
    RecordsCommand, WeeksCommand,
};
use tracing::level_filters::LevelFilter;
use week::{process_week_command, WeekCommand};

use crate::utils::{
    dir::create_log_default_path,
    logging::{enable_logging, CLI_PREFIX},
};

#[derive(Parser, Debug)]
#[command(name = "Weekdots", version, long_about = None)]
#[command(about = "Summarizes weekly tool activity logs", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Print logs to stderr")]
    log: bool,
    #[arg(long = "log-filter", global = true, help = "Log level. Defaults to trace with --log, otherwise RUST_LOG or debug")]
    log_filter: Option<LevelFilter>,
    #[arg(long = "save-logs", global = true, help = "Also write logs into daily rotated files")]
    save_logs: bool,
    #[arg(
        long = "log-dir",
        global = true,
        help = "Directory for saved logs. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Print the log as read, before days are decoded")]
    Parse {
        #[command(flatten)]
        command: ParseCommand,
    },
    #[command(about = "Print one record per week, app and day")]
    Records {
        #[command(flatten)]
        command: RecordsCommand,
    },
    #[command(about = "List weeks with recorded activity")]
    Weeks {
        #[command(flatten)]
        command: WeeksCommand,
    },
    #[command(about = "Display activity of one week per app or per day")]
    Week {
        #[command(flatten)]
        command: WeekCommand,
    },
    #[command(about = "Display activity pivoted by week, app and day")]
    Heatmap {
        #[command(flatten)]
        command: HeatmapCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = args
        .log_filter
        .or_else(|| args.log.then_some(LevelFilter::TRACE));
    let log_dir = if args.save_logs {
        Some(args.log_dir.map_or_else(create_log_default_path, Ok)?)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, log_dir.as_deref(), logging_level, args.log)?;

    match args.commands {
        Commands::Parse { command } => process_parse_command(command).await,
        Commands::Records { command } => process_records_command(command).await,
        Commands::Weeks { command } => process_weeks_command(command).await,
        Commands::Week { command } => process_week_command(command).await,
        Commands::Heatmap { command } => process_heatmap_command(command).await,
    }
}
