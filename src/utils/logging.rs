use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};

pub const CLI_PREFIX: &str = "cli";

/// Sets up the global subscriber. Logs always go to stderr when `show_std` is set, so they
/// never mix with the tables printed on stdout. With `log_dir` they are also written into
/// daily rotated files.
pub fn enable_logging(
    prefix: &str,
    log_dir: Option<&Path>,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let appender = log_dir
        .map(|dir| {
            tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix(prefix)
                .build(dir)
        })
        .transpose()?;

    let stderr = std::io::stderr.with_filter(move |_| show_std);

    let filter = tracing_subscriber::EnvFilter::new(filter_directives(
        log_level,
        std::env::var("RUST_LOG").ok(),
    ));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);

    match appender {
        Some(appender) => builder
            .with_writer(stderr.and(appender))
            .with_ansi(false)
            .pretty()
            .try_init(),
        None => builder.with_writer(stderr).pretty().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to set up logging {e}"))?;
    Ok(())
}

/// Directives for the crate's filter. An explicit level wins. `RUST_LOG` holding full
/// directives (`target=level`) is used as is, a bare level is scoped to this crate.
fn filter_directives(log_level: Option<LevelFilter>, rust_log: Option<String>) -> String {
    let crate_name = env!("CARGO_PKG_NAME").replace("-", "_");
    match (log_level, rust_log) {
        (Some(level), _) => format!("{crate_name}={level}"),
        (None, Some(directives)) if directives.contains('=') => directives,
        (None, Some(level)) if !level.trim().is_empty() => format!("{crate_name}={}", level.trim()),
        (None, _) => format!("{crate_name}=debug"),
    }
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::filter_directives;

    #[test]
    fn explicit_level_is_scoped_to_crate() {
        assert_eq!(
            filter_directives(Some(LevelFilter::TRACE), Some("weekdots=info".into())),
            "weekdots=trace"
        );
    }

    #[test]
    fn rust_log_directives_are_kept_whole() {
        assert_eq!(filter_directives(None, Some("weekdots=info".into())), "weekdots=info");
        assert_eq!(
            filter_directives(None, Some("warn,weekdots::activity=trace".into())),
            "warn,weekdots::activity=trace"
        );
    }

    #[test]
    fn bare_rust_log_level() {
        assert_eq!(filter_directives(None, Some("info".into())), "weekdots=info");
        assert_eq!(filter_directives(None, Some("".into())), "weekdots=debug");
        assert_eq!(filter_directives(None, None), "weekdots=debug");
    }
}
