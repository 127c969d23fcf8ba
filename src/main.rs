use clap::Parser;
use env_logger::Env;
use log::warn;
use snafu::ErrorCompat;
use std::error::Error;

mod args;
mod lab;

fn main() {
    let parsed = args::Args::parse();
    let default_level = if parsed.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = lab::run(&parsed) {
        warn!("Command failed: {:?}", e);
        eprintln!("error: {}", e);
        let mut cause = e.source();
        while let Some(c) = cause {
            eprintln!("  caused by: {}", c);
            cause = c.source();
        }
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
