use clap::Parser;
use log::LevelFilter;

mod args;
mod draw;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = draw::run(&args) {
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}
