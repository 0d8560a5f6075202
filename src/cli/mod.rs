use chrono::Local;
use colored::Colorize;
use log::info;

use crate::cli::{
    colors::COBALT_BLUE,
    config::BenchConfig,
    messages::{highlight_argument, system_message},
    parsers::{CliMode, CliParser},
};

mod bench;
mod colors;
mod config;
mod demo;
mod messages;
pub mod parsers;
mod splash_screen;

pub fn run(parser: CliParser) -> Result<(), String> {
    //! Dispatch the parsed command line to the selected mode.
    //!
    //! Returns a formatted message on failure, ready to be printed.

    splash_screen::splash_screen();

    let started = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    println!(
        "{}",
        system_message(
            "system",
            format!("Run started at '{}'.", highlight_argument(&started))
        )
    );

    let result = match parser.mode {
        CliMode::Demo { json, order } => {
            info!("running the demo session");
            demo::run_demo(json, order.into())
        }
        CliMode::Bench { entries, rounds } => {
            let config = BenchConfig::from_env()
                .map_err(|message| system_message("config", message))?
                .with_overrides(entries, rounds);
            info!(
                "running the benchmark over {} entries, {} rounds",
                config.entries, config.rounds
            );
            bench::run_bench(&config)
        }
    };

    result.map_err(|error| {
        system_message(
            "cobalt",
            format!("{}", error.to_string().as_str().color(COBALT_BLUE).bold()),
        )
    })?;

    println!();
    println!("{}", system_message("system", "Goodbye!".to_string()));
    Ok(())
}
