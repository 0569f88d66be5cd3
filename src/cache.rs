use anyhow::{Context as _, Result};
use std::{
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Tiny key-value store with one file per key.
///
/// Each file holds two lines: the Unix timestamp of the write as a float,
/// then the value. Concurrent writers are not coordinated, the last one wins.
pub(crate) struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Returns `None` when the entry is missing, unreadable, malformed or
    /// older than `max_age`.
    pub(crate) async fn get(&self, key: &str, max_age: Option<Duration>) -> Option<String> {
        self.get_at(key, max_age, SystemTime::now()).await
    }

    async fn get_at(&self, key: &str, max_age: Option<Duration>, now: SystemTime) -> Option<String> {
        let path = self.path(key);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) => {
                log::debug!("cache miss for {key}: {err}");
                return None;
            }
        };

        let (timestamp, value) = contents.split_once('\n').unwrap_or((&contents, ""));
        let Some(written_at) = parse_timestamp(timestamp) else {
            log::debug!("cache entry {key} has a malformed timestamp: {timestamp:?}");
            return None;
        };

        if let Some(max_age) = max_age {
            // entries from the future count as fresh
            let age = now.duration_since(written_at).unwrap_or_default();
            if age > max_age {
                log::debug!("cache entry {key} expired ({age:?} > {max_age:?})");
                return None;
            }
        }

        log::debug!("cache hit for {key}");
        Some(value.trim().to_string())
    }

    pub(crate) async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.put_at(key, value, SystemTime::now()).await
    }

    async fn put_at(&self, key: &str, value: &str, now: SystemTime) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create cache dir {}", self.dir.display()))?;

        let timestamp = now
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the Unix epoch")?
            .as_secs_f64();

        let path = self.path(key);
        tokio::fs::write(&path, format!("{timestamp}\n{value}\n"))
            .await
            .with_context(|| format!("failed to write cache entry {}", path.display()))?;

        Ok(())
    }
}

fn parse_timestamp(line: &str) -> Option<SystemTime> {
    let seconds = line.trim().parse::<f64>().ok()?;
    let offset = Duration::try_from_secs_f64(seconds).ok()?;
    UNIX_EPOCH.checked_add(offset)
}
