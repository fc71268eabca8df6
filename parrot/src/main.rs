use std::path::PathBuf;

use clap::Parser;

use crate::app::App;
use crate::config::Config;

mod app;
mod config;
mod page;
mod utils;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Override the configuration directory
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let result = App::new(Config::get(args.config)).run();

    ratatui::restore();

    if let Err(error) = result {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
