// CLI module - command-line argument parsing and handlers
//
// Running without a subcommand tails the configured job. Subcommands:
// - config --show: Display effective configuration
// - config --path: Show config file path

use crate::config::{Config, VERSION};
use clap::{Args, Parser, Subcommand};

/// Follow a Jenkins job's console output in the terminal
#[derive(Parser)]
#[command(name = "jenkins-tail")]
#[command(version = VERSION)]
#[command(about = "Live tail of the latest Jenkins build's console log", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags for the default (tail) mode; each overrides env and config file
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Job URL, e.g. https://ci.example.com/job/app/job/main
    #[arg(long, env = "JENKINS_URL")]
    pub url: Option<String>,

    /// Basic-auth user
    #[arg(long, env = "JENKINS_USER")]
    pub user: Option<String>,

    /// API token or password
    #[arg(long, env = "JENKINS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Seconds between status polls
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Indent continuation lines of wrapped output by N columns
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Stream the log to stdout instead of the full-screen view
    #[arg(long)]
    pub no_tui: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle a subcommand. Returns the process exit code.
pub fn handle_command(command: &Commands, run: &RunArgs) -> i32 {
    match command {
        Commands::Config { show, path } => {
            if *path {
                handle_config_path()
            } else if *show {
                handle_config_show(run)
            } else {
                println!("Usage: jenkins-tail config [--show|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                0
            }
        }
    }
}

fn handle_config_path() -> i32 {
    match Config::config_path() {
        Some(path) => {
            println!("{}", path.display());
            0
        }
        None => {
            eprintln!("Error: Could not determine config path");
            1
        }
    }
}

fn handle_config_show(run: &RunArgs) -> i32 {
    let mut config = Config::from_env();
    config.apply_cli(run);

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    0
}
