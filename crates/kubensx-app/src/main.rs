mod cli;
mod commands;
mod completion;
mod output;
mod prompt;

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use crossterm::terminal;
use kubensx_config::AppConfig;
use kubensx_core::KubensxError;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    if let Some(line) = completion::requested_line() {
        for candidate in completion::candidates(&Cli::command(), &line) {
            println!("{candidate}");
        }
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();
    init_tracing(cli.debug);
    install_panic_hook();

    let config = AppConfig::load();
    match commands::run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<KubensxError>(), Some(KubensxError::Interrupted)) => ExitCode::from(130),
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).without_time().with_target(false).init();
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        original_hook(panic_info);
    }));
}
