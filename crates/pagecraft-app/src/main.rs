//! Main application entry point.

use clap::Parser;
use pagecraft_app::{App, AppConfig, AppResult, Cli};

fn main() {
    env_logger::init();
    log::info!("Starting Pagecraft");

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::from(&cli);
    let mut app = App::open(config)?;
    let output = app.execute(cli.command)?;
    print!("{output}");
    Ok(())
}
