use clap::Parser;
use englab::{app, config};

/// Entry point of the CLI binary. Loads configuration and dispatches.
fn main() {
    env_logger::init();
    if let Err(err) = try_run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = app::Cli::parse();
    let cfg = config::load_or_default()?;
    app::run(cli.command, &cfg)?;
    Ok(())
}
