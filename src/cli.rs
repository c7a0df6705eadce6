// ABOUTME: Command-line interface definitions using clap
// ABOUTME: Defines all subcommands and global flags

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tickmark")]
#[command(about = "Export TickTick tasks to per-project markdown files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Bearer token (overrides TICKTICK_ACCESS_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, global = true, default_value = "https://api.ticktick.com")]
    pub api_base: String,

    /// Output directory for exported task files
    #[arg(long, global = true, default_value = "./tasks")]
    pub output_dir: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export all projects and their tasks to markdown (default)
    Export {
        /// Include the sanitized task title in output filenames
        #[arg(long)]
        title_in_filename: bool,
    },

    /// Obtain an access token via the OAuth2 authorization-code flow
    Auth,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Export {
            title_in_filename: false,
        })
    }
}
