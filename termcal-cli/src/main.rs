mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "termcal")]
#[command(about = "Turn a term timetable into an iCalendar (.ics) file")]
struct Cli {
    /// Show debug logs (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/termcal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the term calendar to an .ics file
    Generate {
        /// Schedule file (defaults to the built-in term)
        #[arg(short, long)]
        schedule: Option<PathBuf>,

        /// Output path (defaults to psb.ics)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the calendar instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// List the term's events in order
    List {
        /// Schedule file (defaults to the built-in term)
        #[arg(short, long)]
        schedule: Option<PathBuf>,

        /// Only show this course (by code, e.g. "MI(2007MK)")
        #[arg(short, long)]
        course: Option<String>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in schedule to an editable TOML file
    Init {
        #[arg(default_value = "schedule.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            schedule,
            output,
            stdout,
        } => {
            let schedule = config.schedule_path(schedule);
            let output = config.output_path(output);
            commands::generate::run(&config, schedule.as_deref(), &output, stdout)
        }
        Commands::List {
            schedule,
            course,
            json,
        } => {
            let schedule = config.schedule_path(schedule);
            commands::list::run(schedule.as_deref(), course.as_deref(), json)
        }
        Commands::Init { path, force } => commands::init::run(&path, force),
    }
}

/// Logs go to stderr so `generate --stdout` output stays clean.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
