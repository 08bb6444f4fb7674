//! Run logging.
//!
//! Analyses are short single-run processes, so the default logger prints
//! `[elapsed LEVEL] message` to stderr with the time since startup as the
//! only timestamp. At debug verbosity and below the module target is
//! appended, which is enough to follow a run across the pipeline stages.
//! Builds with the `tracing` feature can install a tracing subscriber
//! instead, optionally emitting JSON lines for log collectors.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct ElapsedLogger {
    level: LevelFilter,
    started: Instant,
}

fn render(record: &Record, elapsed: f64, with_target: bool) -> String {
    if with_target {
        format!(
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        )
    } else {
        format!("[{:7.3}s {:>5}] {}", elapsed, record.level(), record.args())
    }
}

impl Log for ElapsedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let line = render(record, elapsed, self.level >= LevelFilter::Debug);
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<ElapsedLogger> = OnceLock::new();

/// Install the elapsed-time logger with the provided level filter.
///
/// Only the first call installs anything; later calls are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| ElapsedLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a tracing subscriber instead of the elapsed-time logger.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"debug"`)
/// seeds the filter. With `json` the subscriber emits one JSON object per
/// event with span-close timings, for piping into log collectors.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use log::{Level, Record};

    #[test]
    fn line_format_tracks_verbosity() {
        let record = Record::builder()
            .args(format_args!("sampled 96 points"))
            .level(Level::Info)
            .target("line_profile::pipeline")
            .build();

        assert_eq!(render(&record, 1.5, false), "[  1.500s  INFO] sampled 96 points");
        assert_eq!(
            render(&record, 1.5, true),
            "[  1.500s  INFO line_profile::pipeline] sampled 96 points"
        );
    }
}
