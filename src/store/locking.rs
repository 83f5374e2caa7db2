//! File locking utilities for safe concurrent access
//!
//! Advisory locks via `fs2`. Locks are cooperative: all participants
//! must go through these functions (or hold the same lock discipline)
//! for the protection to be effective.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Read file contents under a shared (read) lock.
pub fn locked_read(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    file.lock_shared()
        .with_context(|| format!("Failed to acquire shared lock: {}", path.display()))?;
    let mut content = String::new();
    BufReader::new(&file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(content)
}

/// Write file contents under an exclusive (write) lock.
///
/// The file is truncated only AFTER the exclusive lock is held, so a
/// concurrent reader can never observe an empty file between truncation
/// and the write completing.
pub fn locked_write(path: &Path, content: &str) -> Result<()> {
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;
    file.set_len(0)
        .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
    let mut writer = BufWriter::new(&file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}

/// Read-check-write a file under one exclusive lock.
///
/// `apply` receives the current contents and returns the replacement
/// contents, or `None` to leave the file untouched. Because the lock is
/// held across the read and the write, this gives compare-and-swap
/// semantics to callers that decide the write from the current state.
pub fn locked_update<E>(
    path: &Path,
    apply: impl FnOnce(&str) -> Result<Option<String>, E>,
) -> Result<Result<(), E>> {
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .with_context(|| format!("Failed to open file for update: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;

    let mut current = String::new();
    BufReader::new(&file)
        .read_to_string(&mut current)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    match apply(&current) {
        Ok(Some(replacement)) => {
            file.set_len(0)
                .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
            let mut writer = BufWriter::new(&file);
            // set_len does not move the cursor; write from the start
            use std::io::Seek;
            writer
                .seek(std::io::SeekFrom::Start(0))
                .with_context(|| format!("Failed to seek: {}", path.display()))?;
            writer
                .write_all(replacement.as_bytes())
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("Failed to flush file: {}", path.display()))?;
            Ok(Ok(()))
        }
        Ok(None) => Ok(Ok(())),
        Err(e) => Ok(Err(e)),
    }
}
