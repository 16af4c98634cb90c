use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;
use taskdeck::config;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand: launch the TUI
            let server = config::resolve_server_url(cli.server.as_deref());
            if let Err(e) = taskdeck::tui::run(&server) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
