//! Per-dispatch performance metrics.

/// Timing and fan-out data collected during one dispatch envelope
/// (forward dispatch, undo or redo).
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchMetrics {
    /// Wall-clock time for the entire envelope.
    pub total_us: u64,
    /// Time spent in pre-processors and the mutation check.
    pub pre_process_us: u64,
    /// Time spent performing actions.
    pub perform_us: u64,
    /// Time spent in post hooks, notification and post-processors.
    pub post_process_us: u64,
    /// Time spent rendering and storing the mutation snapshot.
    pub snapshot_us: u64,
    /// Actions performed.
    pub action_count: usize,
    /// Distinct observers notified.
    pub observers_notified: usize,
}
