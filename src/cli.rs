// Command-line surface, defined with clap derive.

use crate::filter::FieldPath;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cacoon", version, about = "A wrapper CLI for Cacoo", long_about = None)]
#[command(
    after_help = "Environment:\n  CACOON_API_KEY   API key (required)\n  CACOON_ENDPOINT  API base URL (default: https://cacoo.com/api/v1)\n\nExamples:\n  cacoon diagram list --ids\n  cacoon d g <DIAGRAM_ID> --filter owner.name\n"
)]
pub struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Suppress the progress spinner (always drawn on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Control diagrams
    #[command(visible_alias = "d", subcommand)]
    Diagram(DiagramCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum DiagramCommand {
    /// Add a new diagram
    #[command(visible_alias = "a")]
    Add {
        /// JSON object to POST to the create endpoint instead of a plain GET
        #[arg(long, value_name = "JSON")]
        body: Option<String>,
    },

    /// List diagrams
    #[command(visible_alias = "l")]
    List {
        /// List diagram ids only, one per line
        #[arg(short, long)]
        ids: bool,
    },

    /// Get a diagram
    #[command(visible_alias = "g")]
    Get {
        /// Diagram ID
        #[arg(value_parser = parse_diagram_id)]
        id: String,

        /// Print a single field, e.g. `owner.name` or `sheets.0.uid`
        #[arg(short, long, value_name = "PATH")]
        filter: Option<FieldPath>,
    },

    /// Remove an existing diagram
    #[command(visible_aliases = ["r", "d"])]
    Remove {
        /// Diagram ID
        #[arg(value_parser = parse_diagram_id)]
        id: String,
    },
}

/// A diagram id is used as a single URL path segment.
fn parse_diagram_id(s: &str) -> Result<String, String> {
    match s {
        "" => Err("diagram id must not be empty".to_string()),
        "." | ".." => Err(format!("'{}' is not a diagram id", s)),
        _ if s.contains('/') => Err("diagram id must not contain '/'".to_string()),
        _ => Ok(s.to_string()),
    }
}
