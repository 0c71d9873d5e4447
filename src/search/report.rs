//! Restart report lines.

use super::{trail::DecLvl, Mode};
use tracing::debug;

/// Emitted once per restart, after backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartEvent {
    pub restarts: u64,
    pub conflicts: u64,
    pub decisions: u64,
    pub mode: Mode,
    /// decision level the restart was triggered at
    pub level: DecLvl,
    /// decision level kept by trail reuse
    pub reused: DecLvl,
    /// conflicts before the next focused mode restart may fire
    pub limit: u64,
}

/// Sink for restart events, must not fail.
pub trait Report {
    fn report(&mut self, event: &RestartEvent);
}

/// Writes restart events to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReport;

impl Report for TracingReport {
    fn report(&mut self, event: &RestartEvent) {
        debug!(
            "R {} {} restarts {} conflicts {} decisions (limit {}) level {} -> {}",
            event.mode,
            event.restarts,
            event.conflicts,
            event.decisions,
            event.limit,
            event.level,
            event.reused
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tracing_report_line() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        TracingReport.report(&RestartEvent {
            restarts: 3,
            conflicts: 120,
            decisions: 415,
            mode: Mode::Stable,
            level: DecLvl::new(7),
            reused: DecLvl::new(2),
            limit: 121,
        });
    }
}
