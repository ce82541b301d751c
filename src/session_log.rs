//! Session log: score over time as CSV rows `elapsed_seconds,score`.
//!
//! Each run writes to a fresh `session_data_<n>.csv`, where `n` is one more
//! than the largest number already used in the log directory.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::types::LOG_INTERVAL_MS;

const PREFIX: &str = "session_data_";
const SUFFIX: &str = ".csv";

/// Number embedded in a log file name, if it is one of ours
fn log_number(name: &str) -> Option<u32> {
    name.strip_prefix(PREFIX)?
        .strip_suffix(SUFFIX)?
        .parse()
        .ok()
}

/// Path for the next session log in `dir`
pub fn next_log_path(dir: &Path) -> Result<PathBuf> {
    let mut max = 0u32;
    if dir.exists() {
        let entries =
            fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            if let Some(n) = entry.file_name().to_str().and_then(log_number) {
                max = max.max(n);
            }
        }
    }
    Ok(dir.join(format!("{}{}{}", PREFIX, max.saturating_add(1), SUFFIX)))
}

/// Append-only score log for one run
pub struct SessionLog {
    path: PathBuf,
    out: BufWriter<File>,
    started: Instant,
    last_row: Instant,
    interval: Duration,
}

impl SessionLog {
    /// Create the next numbered log file in `dir`
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let path = next_log_path(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let now = Instant::now();
        Ok(Self {
            path,
            out: BufWriter::new(file),
            started: now,
            last_row: now,
            interval: Duration::from_millis(LOG_INTERVAL_MS as u64),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a row if the logging interval has passed since the last one
    pub fn maybe_record(&mut self, now: Instant, score: u32) -> Result<bool> {
        if now.duration_since(self.last_row) < self.interval {
            return Ok(false);
        }
        self.record(now, score)?;
        Ok(true)
    }

    /// Write a row now
    pub fn record(&mut self, now: Instant, score: u32) -> Result<()> {
        let elapsed = now.duration_since(self.started).as_secs_f64();
        writeln!(self.out, "{:.3},{}", elapsed, score)
            .and_then(|_| self.out.flush())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        self.last_row = now;
        Ok(())
    }
}
