use std::process::ExitCode;

use clap::Parser;
use log::error;

use crate::cli::parsers::CliParser;

mod cli;

fn main() -> ExitCode {
    let parser = CliParser::parse();

    match cli::run(parser) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("run failed: {}", message);
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
