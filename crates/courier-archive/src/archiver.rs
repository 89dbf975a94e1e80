use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use courier_core::error::CourierError;
use courier_core::logger::{timestamped, LogSink};

/// Archive name for `path` at `now`: `{basename}_{YYYYMMDDHHMMSS}.tar`.
pub fn archive_name(path: &Path, now: &DateTime<Local>) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log".to_string());
    format!("{base}_{}.tar", now.format("%Y%m%d%H%M%S"))
}

/// Archive one log file if it has reached `max_size` bytes.
///
/// Takes the sink for a rewrite, so the copy-and-truncate never splits a line
/// and loggers queue instead of waiting. Returns the archive path, or `None`
/// when the file is missing or below the threshold. An existing archive with
/// the same name is never overwritten; the file is left as is and retried on
/// the next pass. A failed write removes the partial archive.
pub fn archive_file(
    sink: &LogSink,
    archive_dir: &Path,
    max_size: u64,
    now: &DateTime<Local>,
) -> Result<Option<PathBuf>, CourierError> {
    let _rewrite = sink.rewrite();
    let path = sink.path();

    let mut file = match OpenOptions::new().read(true).write(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if file.metadata()?.len() < max_size {
        return Ok(None);
    }
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;

    fs::create_dir_all(archive_dir)?;
    let target = archive_dir.join(archive_name(path, now));
    let out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
        .map_err(|e| {
            CourierError::Archive(format!("cannot create {}: {e}", target.display()))
        })?;

    let entry_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("log"));
    let written = write_tar(out, &entry_name, &contents, now)
        .and_then(|out| out.sync_all().map_err(CourierError::from));
    if let Err(e) = written {
        let _ = fs::remove_file(&target);
        return Err(e);
    }

    file.set_len(0)?;
    Ok(Some(target))
}

fn write_tar<W: Write>(
    out: W,
    entry_name: &Path,
    contents: &[u8],
    now: &DateTime<Local>,
) -> Result<W, CourierError> {
    let mut header = tar::Header::new_gnu();
    header.set_path(entry_name)?;
    header.set_size(contents.len() as u64);
    header.set_mode(0o600);
    header.set_mtime(now.timestamp().max(0) as u64);
    header.set_cksum();

    let mut builder = tar::Builder::new(out);
    builder.append(&header, contents)?;
    Ok(builder.into_inner()?)
}

/// Periodic archiver over a set of log sinks.
#[derive(Debug)]
pub struct Archiver {
    sinks: Vec<Arc<LogSink>>,
    archive_dir: PathBuf,
    max_size: u64,
    journal: Option<LogSink>,
}

impl Archiver {
    /// `sinks` should be the same instances the logger writes through, so
    /// lines logged mid-archival are held back instead of lost.
    pub fn new(sinks: Vec<Arc<LogSink>>, archive_dir: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            sinks,
            archive_dir: archive_dir.into(),
            max_size,
            journal: None,
        }
    }

    /// Also record archival activity to this file. Its parent directory is
    /// created when missing.
    pub fn with_journal(mut self, path: impl Into<PathBuf>) -> Self {
        let journal = LogSink::new(path);
        if let Err(e) = journal.create_parent_dir() {
            warn!("cannot create directory for {}: {e}", journal.path().display());
        }
        self.journal = Some(journal);
        self
    }

    pub fn sinks(&self) -> &[Arc<LogSink>] {
        &self.sinks
    }

    fn note(&self, line: &str) {
        if let Some(journal) = &self.journal {
            let _ = journal.append(&timestamped(line));
        }
    }

    /// One pass over every sink. A failure on one file is logged and does not
    /// stop the others. Returns the archives created.
    pub fn pass(&self) -> Vec<PathBuf> {
        let now = Local::now();
        let mut created = Vec::new();
        for sink in &self.sinks {
            let path = sink.path().display().to_string();
            // Journal writes happen after the sink lock is released.
            match archive_file(sink, &self.archive_dir, self.max_size, &now) {
                Ok(Some(archive)) => {
                    info!("archived {path} to {}", archive.display());
                    self.note(&format!(
                        "Finished archiving file {path} into {}",
                        archive.display()
                    ));
                    created.push(archive);
                }
                Ok(None) => debug!("{path} below archive threshold"),
                Err(e) => {
                    error!("archiving {path} failed: {e}");
                    self.note(&format!("Error: For archiving file {path}, {e}"));
                }
            }
        }
        created
    }

    /// Sleep `interval`, run a pass, repeat. Never returns; stop it by
    /// dropping the task (the binary races it against Ctrl-C).
    pub async fn run(self: Arc<Self>, interval: Duration) {
        info!(
            "archiver watching {} file(s) every {}s (threshold {} bytes)",
            self.sinks.len(),
            interval.as_secs(),
            self.max_size
        );
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let archiver = Arc::clone(&self);
            if let Err(e) = tokio::task::spawn_blocking(move || archiver.pass()).await {
                error!("archive pass aborted: {e}");
            }
        }
    }
}
