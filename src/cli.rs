use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{ArchiveClientConfig, DEFAULT_ARCHIVE_PATH, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub archive: ArchiveArgs,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the archive answers.
    Ping,
    /// List the works filed under a tag.
    Listing(ListingArgs),
    /// Download a single work.
    Work(WorkArgs),
}

#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Base URL of the OTW-archive instance (must be http/https).
    #[arg(long, default_value = DEFAULT_ARCHIVE_PATH)]
    pub archive_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Application name sent in the User-Agent header.
    #[arg(long, default_value = env!("CARGO_PKG_NAME"))]
    pub app_name: String,

    /// Application version sent in the User-Agent header.
    #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
    pub app_version: String,
}

impl ArchiveArgs {
    #[must_use]
    pub fn to_config(&self) -> ArchiveClientConfig {
        ArchiveClientConfig::new(&self.app_name, &self.app_version)
            .with_archive_path(&self.archive_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Args)]
pub struct ListingArgs {
    /// Tag (fandom, character, relationship, freeform) to list.
    #[arg(long)]
    pub tag: String,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, value_enum, default_value_t = ListingFormat::Text)]
    pub format: ListingFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListingFormat {
    /// Numbered, human-readable records.
    Text,
    /// Flattened records as a JSON array.
    Json,
    /// Multi-valued records as a JSON array.
    JsonRaw,
}

#[derive(Debug, Args)]
pub struct WorkArgs {
    /// Work id (the number in `/works/{id}`).
    #[arg(long)]
    pub id: String,

    #[arg(long, value_enum, default_value_t = WorkFormat::Markdown)]
    pub format: WorkFormat,

    /// Write to this file instead of stdout. Must not exist yet.
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkFormat {
    Markdown,
    Html,
}
