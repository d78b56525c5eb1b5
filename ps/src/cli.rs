//! CLI argument parsing for promptstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ps")]
#[command(author, version, about = "Declarative prompt definitions with templating", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prompt directory (overrides config)
    #[arg(short, long)]
    pub dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List loaded prompt names
    List,

    /// Print a prompt file in its canonical form
    Show {
        /// Prompt name
        #[arg(required = true)]
        name: String,
    },

    /// Render a prompt with the given values
    Render {
        /// Prompt name
        #[arg(required = true)]
        name: String,

        /// Template values as a JSON object
        #[arg(short, long)]
        values: Option<String>,

        /// Render only the system prompt
        #[arg(long, conflicts_with = "user")]
        system: bool,

        /// Render only the user prompt
        #[arg(long)]
        user: bool,
    },

    /// Load every prompt file and report problems
    Check,
}
