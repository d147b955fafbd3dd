#![forbid(unsafe_code)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod dom;
pub mod error;
pub mod formats;
pub mod listing;
pub mod logging;
pub mod render;
pub mod work;

pub use client::{ArchiveClient, ConnectionStatus};
pub use config::ArchiveClientConfig;
pub use error::{ArchiveError, Result};
