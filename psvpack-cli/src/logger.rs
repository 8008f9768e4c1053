//! Terminal logger for the `log` facade.
//!
//! Info records go to stdout as plain lines so command output can be piped;
//! warnings and errors go to stderr. With `--debug` every line gets a
//! timestamp and level. `--logfile` mirrors all records to a file with ANSI
//! colour codes removed.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

pub(crate) struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    /// Build the logger. A logfile that can't be opened is returned as an
    /// error alongside a console-only logger.
    fn build(
        debug: bool,
        quiet: bool,
        logfile: Option<&Path>,
    ) -> (Self, Option<std::io::Error>) {
        let level = if debug {
            LevelFilter::Debug
        } else if quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        };

        let opened = logfile.map(|p| OpenOptions::new().create(true).append(true).open(p));
        let (file, err) = match opened {
            Some(Ok(f)) => (Some(Mutex::new(f)), None),
            Some(Err(e)) => (None, Some(e)),
            None => (None, None),
        };

        let logger = Self {
            level,
            timestamps: debug,
            file,
        };
        (logger, err)
    }

    fn max_level(&self) -> LevelFilter {
        if self.file.is_some() {
            LevelFilter::Debug
        } else {
            self.level
        }
    }

    /// Install the logger as the global `log` backend.
    pub(crate) fn init(debug: bool, quiet: bool, logfile: Option<&Path>) {
        let (logger, err) = Self::build(debug, quiet, logfile);
        let max_level = logger.max_level();
        // Only fails if a logger is already installed.
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(max_level);
        }
        if let (Some(path), Some(e)) = (logfile, err) {
            log::warn!("Failed to open logfile {}: {e}", path.display());
        }
    }

    fn format(&self, record: &Record, timestamps: bool) -> String {
        if timestamps {
            format!(
                "[{}] {:5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            record.args().to_string()
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level || self.file.is_some()
    }

    fn log(&self, record: &Record) {
        if record.level() <= self.level {
            let line = self.format(record, self.timestamps);
            if record.level() <= Level::Warn {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }

        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let line = self.format(record, true);
            let plain = strip_ansi_escapes::strip_str(&line);
            let _ = writeln!(f, "{plain}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let _ = f.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_format_has_no_prefix() {
        let logger = CliLogger {
            level: LevelFilter::Info,
            timestamps: false,
            file: None,
        };
        let line = logger.format(
            &Record::builder()
                .args(format_args!("hello {}", "world"))
                .level(Level::Info)
                .build(),
            false,
        );
        assert_eq!(line, "hello world");
    }

    #[test]
    fn test_unopenable_logfile_keeps_console_logging() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("missing-dir").join("psvpack.log");
        let (logger, err) = CliLogger::build(false, false, Some(&bad));
        assert!(err.is_some());
        assert!(logger.file.is_none());
        assert_eq!(logger.level, LevelFilter::Info);
        assert_eq!(logger.max_level(), LevelFilter::Info);
    }

    #[test]
    fn test_logfile_raises_max_level() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("psvpack.log");
        let (logger, err) = CliLogger::build(false, true, Some(&path));
        assert!(err.is_none());
        assert!(logger.file.is_some());
        assert_eq!(logger.level, LevelFilter::Warn);
        assert_eq!(logger.max_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_timestamped_format_has_level() {
        let logger = CliLogger {
            level: LevelFilter::Debug,
            timestamps: true,
            file: None,
        };
        let line = logger.format(
            &Record::builder()
                .args(format_args!("checking cache"))
                .level(Level::Debug)
                .target("psvpack")
                .build(),
            true,
        );
        assert!(line.starts_with('['));
        assert!(line.ends_with("DEBUG psvpack: checking cache"));
    }
}
