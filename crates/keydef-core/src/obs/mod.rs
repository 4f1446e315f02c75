//! Observability: in-process counters and the sink abstraction feeding them.
//!
//! Key-definition logic never touches `metrics` directly; every event goes
//! through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
