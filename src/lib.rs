//! Word Finder library
//!
//! Crawls an artist's catalog on the Genius lyrics site, counts the words of
//! every song and filters songs by keywords. Shared by the HTTP server and
//! the command line binaries.

pub mod cli_style;
pub mod config;
pub mod crawler;
pub mod genius;
pub mod lyrics;
pub mod server;

// Re-export commonly used types for convenience
pub use crawler::{LyricsError, LyricsService};
pub use genius::{GeniusClient, GeniusProvider};
pub use lyrics::{KeywordSet, WordOccurrences};
pub use server::{run_server, RequestsLoggingLevel};
