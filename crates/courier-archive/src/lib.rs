//! # courier-archive
//!
//! Keeps log files bounded. On a fixed interval every monitored file at or
//! above a size threshold is copied into `{basename}_{YYYYMMDDHHMMSS}.tar` and
//! truncated to zero.

pub mod archiver;

pub use archiver::{archive_file, archive_name, Archiver};
