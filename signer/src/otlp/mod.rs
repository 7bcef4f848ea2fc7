//! OpenTelemetry Protocol (OTLP) document shapes and the OTLP/JSON codec.
//!
//! The walker never sees protobuf types. It works on the OTLP/JSON encoding of
//! an export request, decoded into a generic document tree:
//!
//! ```text
//! resourceLogs[]    -> scopeLogs[]    -> logRecords[]
//! resourceMetrics[] -> scopeMetrics[] -> metrics[] -> {gauge|sum|...}.dataPoints[]
//! resourceSpans[]   -> scopeSpans[]   -> spans[]
//! ```

pub mod batch;
pub mod kind;

pub use batch::TelemetryBatch;
pub use kind::{DataPointKind, Hierarchy, TelemetryKind, DATA_POINTS, RESOURCE, SCOPE};
