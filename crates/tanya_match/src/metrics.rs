// Metrics hooks for the `tanya_match` crate.
//
// Callers install a global `EngineMetrics` implementation via
// [`set_engine_metrics`], then `ChatEngine` reports the outcome branch,
// final score, and wall-clock latency of every call to
// [`crate::Responder::respond`]. This keeps instrumentation decoupled from
// any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::ReplyOutcome;

/// Metrics observer for served replies.
pub trait EngineMetrics: Send + Sync {
    /// Record one served reply.
    ///
    /// `outcome` is the terminal arbitration branch, `score` is the final
    /// reply score, and `latency` is the wall-clock duration between the
    /// start and end of the respond call.
    fn record_reply(&self, outcome: &ReplyOutcome, score: f32, latency: Duration);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn EngineMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn EngineMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn EngineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global engine metrics recorder.
///
/// This is typically called once during service startup so all `ChatEngine`
/// instances share the same metrics backend.
pub fn set_engine_metrics(recorder: Option<Arc<dyn EngineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("engine metrics lock poisoned");
    *guard = recorder;
}
