use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "internal-linker")]
#[command(about = "Suggests, inserts, validates and reports internal links between site pages")]
#[command(version)]
pub struct Args {
    /// JSON snapshot with pages, rules and performance records
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Don't seed the built-in rule matrix
    #[arg(long)]
    pub no_default_rules: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print ranked link suggestions for a page
    Suggest {
        /// Source page slug
        slug: String,

        /// Maximum links to suggest (defaults to the configured value)
        #[arg(short, long)]
        max_links: Option<usize>,
    },

    /// Insert links into page content and print the result
    Insert {
        /// Source page slug
        slug: String,

        /// File holding the page content
        #[arg(long)]
        content_file: PathBuf,

        /// Maximum links to insert (defaults to the configured value)
        #[arg(short, long)]
        max_insertions: Option<usize>,
    },

    /// Score a single link
    Validate {
        from: String,
        to: String,
        anchor_text: String,
    },

    /// Link statistics for every registered page
    Report,

    /// The active rule matrix
    Rules,

    /// Impression and click statistics
    Performance,

    /// Record an impression or click for a link
    Track {
        /// Generated link id
        link_id: String,

        /// Event to record
        #[arg(value_enum)]
        event: EventArg,

        /// Write the updated counters back to the data file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EventArg {
    Impression,
    Click,
}
