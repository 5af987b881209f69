use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;

use crate::models::DEFAULT_SESSION;

#[derive(Parser)]
#[command(name = "ubermelon")]
#[command(about = "Browse the Ubermelon catalog and fill a shopping cart")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Session the cart is stored under
    #[arg(short, long, global = true, default_value = DEFAULT_SESSION, env = "UBERMELON_SESSION")]
    pub session: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the melon catalog
    Melons {
        #[command(subcommand)]
        command: MelonCommands,
    },
    /// Shopping cart commands
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum MelonCommands {
    /// List every melon for sale
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },
    /// Show detailed information about a melon
    Show {
        /// Melon ID
        id: String,
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum CartCommands {
    /// Add one melon to the cart
    Add {
        /// Melon ID
        id: String,
    },
    /// Show cart contents and order total
    Show {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },
    /// Empty the cart and end the session
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cart_add_with_session() {
        let args = Args::try_parse_from(["ubermelon", "--session", "alice", "cart", "add", "musk"]).unwrap();
        assert_eq!(args.session, "alice");
        assert!(matches!(
            args.command,
            Commands::Cart { command: CartCommands::Add { ref id } } if id == "musk"
        ));
    }

    #[test]
    fn test_parse_melon_list_json() {
        let args = Args::try_parse_from(["ubermelon", "melons", "list", "-o", "json"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Melons { command: MelonCommands::List { output: OutputFormat::Json } }
        ));
    }
}
