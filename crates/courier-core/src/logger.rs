//! Bot transaction logging.
//!
//! Every API call and webhook delivery is recorded through the [`Logger`]
//! trait. The file implementation keeps two append-only destinations: the
//! operational (bot) log and the error log. Each destination is a
//! [`LogSink`] whose lock is shared with the archiver so a file is never
//! truncated in the middle of a write.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

use crate::config::{shellexpand, LogConfig};

/// Destination of a log statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFile {
    /// Every transaction performed by the bot.
    Bot,
    /// Failures while performing a transaction.
    Error,
}

/// How much the logger writes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// Write to the log files and echo to the parent process console.
    Debug,
    /// Write to the log files only.
    #[default]
    Normal,
    /// Discard everything.
    None,
}

impl LogMode {
    fn as_u8(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Normal => 1,
            Self::None => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Debug,
            1 => Self::Normal,
            _ => Self::None,
        }
    }
}

/// Logging capability injected into the API client and webhook layer.
///
/// Implementations must never fail the caller: write errors are swallowed.
pub trait Logger: Send + Sync {
    /// Change what the logger writes from now on.
    fn set_mode(&self, mode: LogMode);

    /// Append a statement to the selected destination.
    fn log(&self, stmt: &str, file: LogFile);

    /// Echo a statement to the console of the process that started the bot.
    fn log_to_parent(&self, stmt: &str);
}

/// One append-only log file guarded by a write lock.
///
/// Writers wait on each other, but never on a rewrite (archival): while one
/// is in progress lines are held back and written once it finishes.
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    lock: Mutex<()>,
    backlog: Mutex<Backlog>,
}

#[derive(Debug, Default)]
struct Backlog {
    rewriters: usize,
    lines: String,
}

impl LogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            backlog: Mutex::new(Backlog::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file's parent directory if it is missing.
    pub fn create_parent_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn backlog(&self) -> MutexGuard<'_, Backlog> {
        self.backlog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the file for an in-place rewrite. Appends made while the returned
    /// guard lives are queued and flushed, in order, when it drops.
    pub fn rewrite(&self) -> Rewrite<'_> {
        self.backlog().rewriters += 1;
        Rewrite {
            sink: self,
            _write: self.lock(),
        }
    }

    /// Append one line (a newline is added) with a single write call.
    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut backlog = self.backlog();
        if backlog.rewriters > 0 {
            backlog.lines.push_str(&buf);
            return Ok(());
        }
        let _guard = self.lock();
        drop(backlog);
        self.write_now(&buf)
    }

    fn write_now(&self, buf: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(buf.as_bytes())
    }
}

/// Exclusive access to a [`LogSink`]'s file. See [`LogSink::rewrite`].
#[derive(Debug)]
pub struct Rewrite<'a> {
    sink: &'a LogSink,
    _write: MutexGuard<'a, ()>,
}

impl Drop for Rewrite<'_> {
    fn drop(&mut self) {
        let mut backlog = self.sink.backlog();
        backlog.rewriters = backlog.rewriters.saturating_sub(1);
        let pending = std::mem::take(&mut backlog.lines);
        if !pending.is_empty() {
            if let Err(e) = self.sink.write_now(&pending) {
                error!("flushing held log lines to {} failed: {e}", self.sink.path.display());
            }
        }
    }
}

/// Prefix a statement with the current local time.
pub fn timestamped(stmt: &str) -> String {
    format!("{} {stmt}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
}

/// Logger writing to the bot and error log files.
#[derive(Debug)]
pub struct FileLogger {
    bot: Arc<LogSink>,
    error: Arc<LogSink>,
    mode: AtomicU8,
}

impl FileLogger {
    /// Create a logger for the given files. Parent directories are created
    /// when missing.
    pub fn new(bot_log: impl Into<PathBuf>, error_log: impl Into<PathBuf>, mode: LogMode) -> Self {
        let bot = LogSink::new(bot_log);
        let error = LogSink::new(error_log);
        for sink in [&bot, &error] {
            let _ = sink.create_parent_dir();
        }
        Self {
            bot: Arc::new(bot),
            error: Arc::new(error),
            mode: AtomicU8::new(mode.as_u8()),
        }
    }

    pub fn from_config(cfg: &LogConfig) -> Self {
        Self::new(
            shellexpand(&cfg.bot_log_file),
            shellexpand(&cfg.error_log_file),
            cfg.mode,
        )
    }

    pub fn mode(&self) -> LogMode {
        LogMode::from_u8(self.mode.load(Ordering::Relaxed))
    }

    /// Sinks to hand to the archiver so it shares the write locks.
    pub fn sinks(&self) -> Vec<Arc<LogSink>> {
        vec![Arc::clone(&self.bot), Arc::clone(&self.error)]
    }

    fn sink(&self, file: LogFile) -> &LogSink {
        match file {
            LogFile::Bot => &self.bot,
            LogFile::Error => &self.error,
        }
    }
}

impl Logger for FileLogger {
    fn set_mode(&self, mode: LogMode) {
        self.mode.store(mode.as_u8(), Ordering::Relaxed);
    }

    fn log(&self, stmt: &str, file: LogFile) {
        let mode = self.mode();
        if mode == LogMode::None {
            return;
        }
        let _ = self.sink(file).append(&timestamped(stmt));
        if mode == LogMode::Debug {
            self.log_to_parent(stmt);
        }
    }

    fn log_to_parent(&self, stmt: &str) {
        info!(target: "courier::parent", "{stmt}");
    }
}

/// Logger that forwards everything to `tracing`. Used by one-shot commands
/// that have no log files.
#[derive(Debug, Default)]
pub struct TracingLogger {
    mode: AtomicU8,
}

impl Logger for TracingLogger {
    fn set_mode(&self, mode: LogMode) {
        self.mode.store(mode.as_u8(), Ordering::Relaxed);
    }

    fn log(&self, stmt: &str, file: LogFile) {
        if LogMode::from_u8(self.mode.load(Ordering::Relaxed)) == LogMode::None {
            return;
        }
        match file {
            LogFile::Bot => info!("{stmt}"),
            LogFile::Error => error!("{stmt}"),
        }
    }

    fn log_to_parent(&self, stmt: &str) {
        info!(target: "courier::parent", "{stmt}");
    }
}

/// Logger that keeps every statement in memory. Handy for embedding hosts
/// that ship logs elsewhere, and for asserting on log output.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogFile, String)>>,
    mode: AtomicU8,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, in order.
    pub fn entries(&self) -> Vec<(LogFile, String)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Statements written to one destination.
    pub fn lines(&self, file: LogFile) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(f, _)| *f == file)
            .map(|(_, s)| s)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn set_mode(&self, mode: LogMode) {
        self.mode.store(mode.as_u8(), Ordering::Relaxed);
    }

    fn log(&self, stmt: &str, file: LogFile) {
        if LogMode::from_u8(self.mode.load(Ordering::Relaxed)) == LogMode::None {
            return;
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((file, stmt.to_string()));
    }

    fn log_to_parent(&self, stmt: &str) {
        info!(target: "courier::parent", "{stmt}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn test_log_routes_to_destination() {
        let dir = tempfile::tempdir().unwrap();
        let logger = FileLogger::new(
            dir.path().join("bot.log"),
            dir.path().join("error.log"),
            LogMode::Normal,
        );

        logger.log("sent reply", LogFile::Bot);
        logger.log("Error: send failed", LogFile::Error);

        let bot = read(&dir.path().join("bot.log"));
        let err = read(&dir.path().join("error.log"));
        assert!(bot.contains("sent reply"));
        assert!(!bot.contains("send failed"));
        assert!(err.contains("Error: send failed"));
    }

    #[test]
    fn test_lines_are_timestamped_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let logger = FileLogger::new(
            dir.path().join("bot.log"),
            dir.path().join("error.log"),
            LogMode::Normal,
        );

        logger.log("first", LogFile::Bot);
        logger.log("second", LogFile::Bot);

        let content = read(&dir.path().join("bot.log"));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" first"));
        assert!(lines[1].ends_with(" second"));
        // "YYYY-MM-DD HH:MM:SS.mmm " prefix.
        assert_eq!(lines[0].as_bytes()[4], b'-');
        assert_eq!(lines[0].as_bytes()[10], b' ');
    }

    #[test]
    fn test_none_mode_discards() {
        let dir = tempfile::tempdir().unwrap();
        let logger = FileLogger::new(
            dir.path().join("bot.log"),
            dir.path().join("error.log"),
            LogMode::Normal,
        );
        logger.set_mode(LogMode::None);
        assert_eq!(logger.mode(), LogMode::None);

        logger.log("dropped", LogFile::Bot);
        assert!(!dir.path().join("bot.log").exists());
    }

    #[test]
    fn test_debug_mode_still_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = FileLogger::new(
            dir.path().join("bot.log"),
            dir.path().join("error.log"),
            LogMode::Debug,
        );
        logger.log("visible", LogFile::Bot);
        assert!(read(&dir.path().join("bot.log")).contains("visible"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/bot.log");
        let logger = FileLogger::new(&nested, dir.path().join("a/b/error.log"), LogMode::Normal);
        logger.log("hello", LogFile::Bot);
        assert!(read(&nested).contains("hello"));
    }

    #[test]
    fn test_concurrent_writers_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(FileLogger::new(
            dir.path().join("bot.log"),
            dir.path().join("error.log"),
            LogMode::Normal,
        ));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.log(&format!("thread-{t} line-{i} {}", "x".repeat(200)), LogFile::Bot);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let content = read(&dir.path().join("bot.log"));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 400);
        for line in lines {
            assert!(line.contains("thread-") && line.ends_with(&"x".repeat(200)));
        }
    }

    #[test]
    fn test_append_during_rewrite_is_held_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.log");
        let sink = LogSink::new(&path);
        sink.append("before").unwrap();

        let rewrite = sink.rewrite();
        std::fs::write(&path, b"").unwrap();
        // Same thread as the rewrite: a blocking append would deadlock here.
        sink.append("during one").unwrap();
        sink.append("during two").unwrap();
        assert_eq!(read(&path), "");

        drop(rewrite);
        assert_eq!(read(&path), "during one\nduring two\n");
        sink.append("after").unwrap();
        assert_eq!(read(&path), "during one\nduring two\nafter\n");
    }

    #[test]
    fn test_logger_does_not_wait_for_rewrite_on_other_thread() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(FileLogger::new(
            dir.path().join("bot.log"),
            dir.path().join("error.log"),
            LogMode::Normal,
        ));
        let sinks = logger.sinks();
        let rewrite = sinks[0].rewrite();

        let (tx, rx) = std::sync::mpsc::channel();
        let writer = Arc::clone(&logger);
        let handle = std::thread::spawn(move || {
            writer.log("while archiving", LogFile::Bot);
            tx.send(()).unwrap();
        });
        rx.recv_timeout(std::time::Duration::from_secs(5))
            .expect("log call blocked on the rewrite");
        handle.join().unwrap();

        drop(rewrite);
        assert!(read(&dir.path().join("bot.log")).contains("while archiving"));
    }

    #[test]
    fn test_create_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::new(dir.path().join("x/y/archive.log"));
        sink.create_parent_dir().unwrap();
        assert!(dir.path().join("x/y").is_dir());
        LogSink::new("bare.log").create_parent_dir().unwrap();
    }

    #[test]
    fn test_log_mode_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: LogMode,
        }
        let w: Wrapper = toml::from_str("mode = \"none\"").unwrap();
        assert_eq!(w.mode, LogMode::None);
    }

    #[test]
    fn test_memory_logger_records_in_order() {
        let logger = MemoryLogger::new();
        logger.log("a", LogFile::Bot);
        logger.log("b", LogFile::Error);
        logger.log("c", LogFile::Bot);
        assert_eq!(logger.lines(LogFile::Bot), vec!["a", "c"]);
        assert_eq!(logger.lines(LogFile::Error), vec!["b"]);

        logger.set_mode(LogMode::None);
        logger.log("d", LogFile::Bot);
        assert_eq!(logger.entries().len(), 3);
    }

    #[test]
    fn test_sinks_expose_both_paths() {
        let dir = tempfile::tempdir().unwrap();
        let bot = dir.path().join("bot.log");
        let error = dir.path().join("error.log");
        let logger = FileLogger::new(&bot, &error, LogMode::None);
        let paths: Vec<PathBuf> = logger.sinks().iter().map(|s| s.path().to_path_buf()).collect();
        assert_eq!(paths, vec![bot, error]);
    }
}
