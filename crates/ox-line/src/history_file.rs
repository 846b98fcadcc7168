//! Newline-delimited history persistence.
//!
//! The editor keeps history in memory only; saving and restoring it across
//! runs is the host's job. One entry per line, oldest first, capped to the most
//! recent `max_entries`. Blank lines and lines holding control characters are
//! skipped since the editor cannot display them.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use core_state::History;
use tracing::{debug, info};

const FILE_NAME: &str = ".oxline_history";

/// `~/.oxline_history`, or the working directory when there is no home.
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FILE_NAME))
}

fn tail(entries: &[String], max_entries: usize) -> &[String] {
    &entries[entries.len().saturating_sub(max_entries)..]
}

pub fn load(path: &Path, max_entries: usize) -> Result<History> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(target: "runtime", path = %path.display(), "history_missing");
            return Ok(History::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading history from {}", path.display()));
        }
    };
    let mut entries: Vec<String> = Vec::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        if line.chars().any(char::is_control) {
            debug!(target: "runtime", line = ?line, "history_entry_skipped");
            continue;
        }
        entries.push(line.to_string());
    }
    let kept = tail(&entries, max_entries);
    debug!(target: "runtime", path = %path.display(), entries = kept.len(), "history_loaded");
    Ok(History::with_entries(kept.iter().cloned()))
}

pub fn save(path: &Path, entries: &[String], max_entries: usize) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating history directory {}", parent.display()))?;
    }
    let mut text = String::new();
    for entry in tail(entries, max_entries) {
        text.push_str(entry);
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("writing history to {}", path.display()))?;
    debug!(target: "runtime", path = %path.display(), "history_saved");
    Ok(())
}
