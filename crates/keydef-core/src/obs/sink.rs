//! Metrics sink boundary.
//!
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
//! This module is the only bridge between key-definition logic and the
//! thread-local metrics state.

use crate::obs::metrics::{self, EventReport, bump};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Build { parts: usize },
    BuildRejected,
    Compare { parts: usize },
    CompareWithKey { key_parts: usize },
    Extract { parts: usize },
    Merge { parts: usize },
    Probe { supported: bool },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::Build { parts } => {
                bump(&mut m.ops.builds, 1);
                bump(&mut m.ops.parts_built, as_u64(parts));
            }
            MetricsEvent::BuildRejected => bump(&mut m.ops.build_rejections, 1),
            MetricsEvent::Compare { parts } => {
                bump(&mut m.ops.compares, 1);
                bump(&mut m.ops.parts_compared, as_u64(parts));
            }
            MetricsEvent::CompareWithKey { key_parts } => {
                bump(&mut m.ops.compares_with_key, 1);
                bump(&mut m.ops.parts_compared, as_u64(key_parts));
            }
            MetricsEvent::Extract { .. } => bump(&mut m.ops.extracts, 1),
            MetricsEvent::Merge { parts } => {
                bump(&mut m.ops.merges, 1);
                bump(&mut m.ops.parts_built, as_u64(parts));
            }
            MetricsEvent::Probe { supported } => {
                bump(&mut m.ops.probes, 1);
                if supported {
                    bump(&mut m.ops.probes_supported, 1);
                }
            }
        });
    }
}

fn as_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored on every exit path, including unwinding.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = previous;
            });
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(previous);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingSink {
        events: Cell<usize>,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _event: MetricsEvent) {
            self.events.set(self.events.get() + 1);
        }
    }

    #[test]
    fn global_sink_accumulates_counters() {
        metrics_reset_all();
        record(MetricsEvent::Build { parts: 2 });
        record(MetricsEvent::Merge { parts: 3 });
        record(MetricsEvent::Probe { supported: true });

        let report = metrics_report();
        assert_eq!(report.ops.builds, 1);
        assert_eq!(report.ops.merges, 1);
        assert_eq!(report.ops.parts_built, 5);
        assert_eq!(report.ops.probes_supported, 1);
    }

    #[test]
    fn override_sink_is_scoped() {
        metrics_reset_all();
        let sink = Rc::new(CountingSink::default());

        with_metrics_sink(sink.clone(), || {
            record(MetricsEvent::BuildRejected);
            record(MetricsEvent::Extract { parts: 1 });
        });
        record(MetricsEvent::BuildRejected);

        assert_eq!(sink.events.get(), 2);
        assert_eq!(metrics_report().ops.build_rejections, 1);
    }
}
