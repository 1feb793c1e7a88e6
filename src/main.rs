use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod models;
mod storage;
mod store;

use commands::{
    AddCommand, CalendarCommand, ConfigCommand, DayCommand, EnergyCommand, FulfillCommand,
    ListCommand, ShowCommand,
};
use config::Config;
use storage::FileStorage;
use store::{StoreError, WishStore};

#[derive(Parser)]
#[command(name = "wish")]
#[command(version)]
#[command(about = "A local wish tracking journal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new wish
    Add(AddCommand),

    /// List wishes
    List(ListCommand),

    /// Show a wish and its entry log
    Show(ShowCommand),

    /// Log effort against a wish
    Energy(EnergyCommand),

    /// Mark a wish as fulfilled
    Fulfill(FulfillCommand),

    /// Show a month calendar of entry activity
    Calendar(CalendarCommand),

    /// Show all entries logged on a date
    Day(DayCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    execute_command(&cli.command, &config)
}

fn execute_command(
    command: &Option<Commands>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Some(Commands::Add(cmd)) => {
            let mut store = open_store(config)?;
            cmd.run(&mut store)?;
        }
        Some(Commands::List(cmd)) => {
            let store = open_store(config)?;
            cmd.run(&store)?;
        }
        Some(Commands::Show(cmd)) => {
            let store = open_store(config)?;
            cmd.run(&store)?;
        }
        Some(Commands::Energy(cmd)) => {
            let mut store = open_store(config)?;
            cmd.run(&mut store)?;
        }
        Some(Commands::Fulfill(cmd)) => {
            let mut store = open_store(config)?;
            cmd.run(&mut store)?;
        }
        Some(Commands::Calendar(cmd)) => {
            let store = open_store(config)?;
            cmd.run(&store, config)?;
        }
        Some(Commands::Day(cmd)) => {
            let store = open_store(config)?;
            cmd.run(&store)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<WishStore<FileStorage>, StoreError> {
    WishStore::open(FileStorage::new(config.data_path.value.clone()))
}
