use crate::profile::AbstractProfile;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "acer-thermal",
    about = "Platform profile and fan-boost control for Acer Predator laptops",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log firmware requests and responses
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the system/user files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read or change the thermal profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Read or change fan boost
    FanBoost {
        #[command(subcommand)]
        action: FanBoostAction,
    },

    /// Show hardware detection and current firmware state
    Status,

    /// Switch to the boost profile while CPU/GPU run hot, restore afterwards
    Auto {
        /// Profile to restore when temperatures drop (overrides config)
        #[arg(long)]
        profile: Option<AbstractProfile>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (auto-detected if omitted)
        shell: Option<Shell>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the current profile
    Get,
    /// Switch profile (low-power, quiet, balanced, balanced-performance, performance)
    Set { profile: AbstractProfile },
    /// List supported profiles, marking the current one
    List,
}

#[derive(Subcommand)]
pub enum FanBoostAction {
    /// Print the current fan-boost value
    Get,
    /// Set fan boost: 0 or 1
    Set { value: String },
}

/// Print shell completions to stdout.
pub fn print_completions(shell: Option<Shell>) {
    let shell = shell.or_else(Shell::from_env).unwrap_or_else(|| {
        eprintln!(
            "Could not detect shell. Specify one: acer-thermal completions bash|zsh|fish|elvish|powershell"
        );
        std::process::exit(1);
    });
    clap_complete::generate(
        shell,
        &mut Cli::command(),
        "acer-thermal",
        &mut std::io::stdout(),
    );
}
