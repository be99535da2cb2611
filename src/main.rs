use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use anyhow::Context;
use clap::Parser;
use env_logger::{Env, Target};
use log::{error, info};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::config::Config;
use crate::controller::{Flow, Session, UNEXPECTED_FAILURE};
use crate::db::FileStore;
use crate::editor::BankHelper;

mod account;
mod bank;
mod common;
mod config;
mod controller;
mod db;
mod editor;
mod parser;
mod transaction;
mod util;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Database file path
    database: Option<PathBuf>,

    /// Config file, defaults to bankbook/config.toml in the user config directory
    #[clap(long)]
    config: Option<PathBuf>,

    /// Append log records to this file instead of stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli: Cli = Cli::parse();

    let config = match cli.config.clone().or_else(Config::default_path) {
        Some(config_path) => Config::load_from_file(&config_path)?,
        None => Config::default(),
    };

    init_logger(cli.log_file.as_deref().or(config.log_file.as_deref()))?;

    let database = cli.database.clone().unwrap_or_else(|| config.database());
    let mut session = Session::open(FileStore::new(&database), config.policies())?;
    info!("Opened {} with {} accounts", database.display(), session.bank().accounts().len());

    let mut rl: Editor<BankHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(BankHelper::new()));
    let history_file = config.history_file();
    if rl.load_history(&history_file).is_err() {
        println!("No previous history.");
    }
    println!("Type help to list the commands.");

    let mut stdout = io::stdout();
    loop {
        let readline = rl.readline(&session.prompt());
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                let statement = match parser::parse(line) {
                    Ok(statement) => statement,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };

                match session.execute(statement, &mut stdout) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(err) => {
                        error!("Command '{line}' failed: {err:?}");
                        println!("{UNEXPECTED_FAILURE}");
                    }
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break
            }
        }
    }
    rl.save_history(&history_file)?;
    Ok(())
}

/// Log to stderr at `info`, or append to `log_file` at `debug`. `RUST_LOG` overrides either.
fn init_logger(log_file: Option<&Path>) -> anyhow::Result<()> {
    match log_file {
        Some(log_file) => {
            let file = OpenOptions::new().create(true).append(true).open(log_file)
                .with_context(|| format!("Unable to open log file {}", log_file.display()))?;
            env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => env_logger::Builder::from_env(Env::default().default_filter_or("info")).init(),
    }
    Ok(())
}
