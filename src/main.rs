#![allow(clippy::uninlined_format_args)]

mod args;
mod commands;

use clap::Parser;
use colored::Colorize;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = args::Args::parse_from(wild::args_os());

    match commands::execute_command(&args.command) {
        Ok(message) => {
            if !message.is_empty() {
                println!("{}", message)
            }
        }
        Err(error) => {
            eprintln!("{} {:?}", "error:".red().bold(), error);
            std::process::exit(1);
        }
    }
}
