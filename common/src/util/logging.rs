use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use env_logger::Logger;
use indicatif_log_bridge::LogWrapper;
use log::{info, LevelFilter, SetLoggerError};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static MULTI: OnceLock<MultiProgress> = OnceLock::new();

pub fn initialize_logging(log_level: LevelFilter) -> Result<(), SetLoggerError> {
    // Allow overriding log level through RUST_LOG env var
    let logger = build_logger(log_level, std::env::var(env_logger::DEFAULT_FILTER_ENV).ok().as_deref());
    // The bridge doesn't forward the logger's level, so it has to be set before wrapping
    let max_level = logger.filter();

    let multi = MULTI.get_or_init(MultiProgress::new).clone();

    LogWrapper::new(multi, logger).try_init()?;
    log::set_max_level(max_level);

    Ok(())
}

fn build_logger(log_level: LevelFilter, filters: Option<&str>) -> Logger {
    let mut builder = env_logger::builder();
    builder.filter_level(log_level);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder.build()
}

/// Runs `function` while showing a spinner, then logs how long it took.
///
/// Works without `initialize_logging` too (e.g. in tests), the spinner is just not attached to the
/// log bridge then.
pub fn run_with_spinner<'a, F, Out>(
    target: &'a str, task_desc: &'a str, function: F,
) -> Out where
    F: FnOnce() -> Out,
{
    let start_time = Instant::now();

    let style = ProgressStyle::with_template("{spinner:.white} [{elapsed:.green}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = ProgressBar::new_spinner()
        .with_message(format!("{}...", task_desc))
        .with_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));

    // Route the spinner through the log bridge so that it doesn't jump around
    let pb = match MULTI.get() {
        Some(multi) => multi.add(pb),
        None => pb,
    };

    let out = function();

    pb.finish_and_clear();
    if let Some(multi) = MULTI.get() {
        multi.remove(&pb);
    }
    let elapsed = indicatif::HumanDuration(start_time.elapsed());
    info!(target: target, "{} finished (took {})", task_desc, elapsed);

    out
}
