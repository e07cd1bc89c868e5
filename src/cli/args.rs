//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HashShield - Local SHA-256 file hashing and verification
#[derive(Parser, Debug)]
#[command(name = "hashshield")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subcommands (omit to start the GUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the SHA-256 hash of a file and record it in the history
    Hash {
        /// File to hash
        file: PathBuf,
    },

    /// Verify a file against an expected SHA-256 hash
    Verify {
        /// File to verify
        file: PathBuf,
        /// Expected SHA-256 hash (case-insensitive)
        expected: String,
    },

    /// Show the recent-hash history
    History {
        /// Clear all recorded entries instead of listing them
        #[arg(long)]
        clear: bool,
    },
}
