// ABOUTME: CLI entrypoint for tickmark command
// ABOUTME: Handles error exit codes and command dispatch

use clap::Parser;
use tickmark::{
    api::ApiClient,
    auth,
    cli::{Cli, Commands},
    export::{export_all, ExportOptions},
    storage::Paths,
    Result,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("tickmark: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    // Missing .env is fine; the environment may carry everything
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command() {
        Commands::Export { title_in_filename } => {
            let token = auth::resolve_token(cli.token)?;
            println!(
                "Using access token: {}...",
                token.chars().take(10).collect::<String>()
            );
            let client = ApiClient::new(token, Some(cli.api_base))?;
            let paths = Paths::new(cli.output_dir);
            export_all(&client, &paths, &ExportOptions { title_in_filename })?;
        }
        Commands::Auth => {
            auth::run_interactive(None)?;
        }
    }

    Ok(())
}
