//! CLI module
//!
//! Command-line interface for HashShield.

mod args;

pub use args::{Args, Commands};

use crate::core::{digest, history::HistoryStore, verify};
use crate::util::format_size;
use anyhow::{Context, Result};
use std::path::Path;

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Hash a file and record the result in the history
pub async fn run_hash(path: &Path) -> Result<()> {
    let name = display_name(path);
    let size = std::fs::metadata(path)
        .context(format!("Cannot access '{}'", path.display()))?
        .len();

    let hash = digest::hash_file(path)
        .await
        .context(format!("Failed to hash '{}'", path.display()))?;

    println!("🔒 SHA-256 hash of {} ({}):", name, format_size(size));
    println!("   {}", hash);

    let history = HistoryStore::open();
    if let Err(e) = history.add(&name, &hash, size) {
        tracing::warn!("Failed to record hash in history: {}", e);
    }

    Ok(())
}

/// Verify a file against an expected hash
pub async fn run_verify(path: &Path, expected: &str) -> Result<()> {
    let name = display_name(path);

    let result = verify::verify_file(path, expected)
        .await
        .context(format!("Failed to verify '{}'", path.display()))?;

    println!("   Computed: {}", result.actual);

    if result.matched {
        println!("✅ {} matches the expected hash.", name);
        Ok(())
    } else {
        println!("❌ {} does NOT match the expected hash.", name);
        println!("   The file may be corrupted or tampered with.");
        anyhow::bail!("hash mismatch")
    }
}

/// List or clear the recent-hash history
pub fn run_history(clear: bool) -> Result<()> {
    let history = HistoryStore::open();

    if clear {
        history.clear()?;
        println!("✅ Hash history cleared.");
        return Ok(());
    }

    let entries = history.list();

    if entries.is_empty() {
        println!("🕓 No hashes recorded yet.");
        println!("   Use 'hashshield hash <file>' to record one.");
        return Ok(());
    }

    println!("🕓 Recent hashes ({}):", entries.len());
    println!();

    for entry in &entries {
        println!(
            "   {} - {} ({})",
            entry.date.format("%Y-%m-%d %H:%M"),
            entry.filename,
            format_size(entry.file_size)
        );
        println!("     {}", entry.hash);
    }

    Ok(())
}
