//! Spotify Library Export Library
//!
//! This library exports a user's Spotify library (playlists with their tracks,
//! liked songs, followed artists and saved albums) into a local JSON document.
//! Access is granted through the OAuth implicit-grant flow: a short-lived local
//! callback server captures the token from the browser redirect and hands it to
//! the waiting main flow through a one-shot token gate.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `gate` - One-shot token gate between the callback server and the main flow
//! - `management` - Library assembly and export persistence
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod gate;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Fetching liked songs...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only meant
/// for fatal conditions in the command layer (no token obtained, export file
/// could not be written).
///
/// # Example
///
/// ```
/// error!("Failed to write export file: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures: a section that could not be fetched, a
/// browser that could not be launched, a rejected authorization attempt.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
