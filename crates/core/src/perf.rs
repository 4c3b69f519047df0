//! Frame-budget monitoring for the filter+cluster pass.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One 60 fps frame.
pub const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Emitted when a measured pass runs past its budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetExceeded {
    pub label: &'static str,
    pub elapsed_ms: f64,
    pub budget_ms: f64,
}

type BudgetHook = Arc<dyn Fn(&BudgetExceeded) + Send + Sync>;

/// Measures pass durations against a fixed budget.
///
/// Overruns are logged with `tracing::warn!` and forwarded to the optional
/// hook. They are never errors.
#[derive(Clone)]
pub struct PerformanceMonitor {
    budget: Duration,
    on_exceeded: Option<BudgetHook>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(FRAME_BUDGET)
    }
}

impl fmt::Debug for PerformanceMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceMonitor")
            .field("budget", &self.budget)
            .field("has_hook", &self.on_exceeded.is_some())
            .finish()
    }
}

impl PerformanceMonitor {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            on_exceeded: None,
        }
    }

    /// Registers a callback invoked once per over-budget pass.
    pub fn on_budget_exceeded<F>(mut self, hook: F) -> Self
    where
        F: Fn(&BudgetExceeded) + Send + Sync + 'static,
    {
        self.on_exceeded = Some(Arc::new(hook));
        self
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Captures the start timestamp of a pass.
    pub fn start(&self, label: &'static str) -> PassTimer<'_> {
        PassTimer {
            monitor: self,
            label,
            started: Instant::now(),
        }
    }
}

/// Handle for one measured interval.
#[must_use = "call end() to report the elapsed time"]
#[derive(Debug)]
pub struct PassTimer<'a> {
    monitor: &'a PerformanceMonitor,
    label: &'static str,
    started: Instant,
}

impl PassTimer<'_> {
    /// Elapsed time so far, without ending the interval.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Ends the interval and returns the elapsed milliseconds.
    pub fn end(self) -> f64 {
        let elapsed = self.started.elapsed();
        let elapsed_ms = duration_ms(elapsed);
        if elapsed > self.monitor.budget {
            let event = BudgetExceeded {
                label: self.label,
                elapsed_ms,
                budget_ms: duration_ms(self.monitor.budget),
            };
            tracing::warn!(
                pass = event.label,
                elapsed_ms = event.elapsed_ms,
                budget_ms = event.budget_ms,
                "pass exceeded frame budget"
            );
            if let Some(hook) = &self.monitor.on_exceeded {
                hook(&event);
            }
        }
        elapsed_ms
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}
