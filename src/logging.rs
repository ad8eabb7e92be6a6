#![cfg(feature = "std")]

//! Stderr logger for the binaries.
//!
//! `SEABATTLE_LOG` holds comma-separated directives. A bare level sets the
//! default and `target=level` overrides it for a module path and everything
//! below it, e.g. `warn,seabattle::ai=debug`.

use std::cmp;
use std::env;
use std::string::{String, ToString};
use std::vec::Vec;

use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;

/// Parsed form of a `SEABATTLE_LOG` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSpec {
    default: LevelFilter,
    /// Sorted longest target first.
    targets: Vec<(String, LevelFilter)>,
}

impl LogSpec {
    /// Parse `spec`, starting from `default`. Directives with an unknown
    /// level are skipped.
    pub fn parse(spec: &str, default: LevelFilter) -> Self {
        let mut parsed = LogSpec {
            default,
            targets: Vec::new(),
        };
        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    if let Ok(level) = level.trim().parse() {
                        parsed.targets.push((target.trim().to_string(), level));
                    }
                }
                None => {
                    if let Ok(level) = directive.parse() {
                        parsed.default = level;
                    }
                }
            }
        }
        parsed.targets.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        parsed
    }

    pub fn default_level(&self) -> LevelFilter {
        self.default
    }

    /// Level applied to records logged under `target`.
    pub fn level_for(&self, target: &str) -> LevelFilter {
        self.targets
            .iter()
            .find(|(prefix, _)| covers(prefix, target))
            .map_or(self.default, |&(_, level)| level)
    }

    /// Most verbose level any directive enables.
    pub fn max_level(&self) -> LevelFilter {
        self.targets
            .iter()
            .map(|&(_, level)| level)
            .fold(self.default, cmp::max)
    }
}

fn covers(prefix: &str, target: &str) -> bool {
    target
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

struct StderrLogger {
    spec: LogSpec,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.spec.level_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceCell<StderrLogger> = OnceCell::new();

/// Install the stderr logger, `info` unless `SEABATTLE_LOG` says otherwise.
pub fn init_logging() {
    init_logging_with(LevelFilter::Info);
}

/// Same as [`init_logging`] but with a caller-chosen fallback level.
pub fn init_logging_with(default: LevelFilter) {
    let spec = LogSpec::parse(&env::var("SEABATTLE_LOG").unwrap_or_default(), default);
    let max = spec.max_level();
    let logger = LOGGER.get_or_init(|| StderrLogger { spec });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(max);
    }
}
