use std::time::Instant;

use tracing::debug;

/// Runs file or database work inline on the UI thread and logs how long it took.
pub fn run_blocking<F, T>(label: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let started = Instant::now();
    let value = f();
    debug!(task = label, elapsed_ms = started.elapsed().as_millis() as u64, "blocking task done");
    value
}
