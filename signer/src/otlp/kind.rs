//! Telemetry kinds and their hierarchy field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Field holding the resource description inside a resource wrapper.
pub const RESOURCE: &str = "resource";

/// Field holding the instrumentation scope inside a scope wrapper.
pub const SCOPE: &str = "scope";

/// Field holding the data points inside a metric's data-point container.
pub const DATA_POINTS: &str = "dataPoints";

/// Represents the three OTLP signal types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryKind {
    /// Log records.
    Logs,
    /// Metric data points.
    Metrics,
    /// Spans.
    Traces,
}

/// Field names of the three nested lists for one telemetry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hierarchy {
    /// Root list of resource wrappers, e.g. `resourceLogs`.
    pub resources: &'static str,
    /// Scope wrappers inside a resource wrapper, e.g. `scopeLogs`.
    pub scopes: &'static str,
    /// Records inside a scope wrapper, e.g. `logRecords`.
    pub records: &'static str,
}

impl TelemetryKind {
    /// All telemetry kinds.
    pub const ALL: [Self; 3] = [Self::Logs, Self::Metrics, Self::Traces];

    /// Returns the hierarchy field names for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use signer::otlp::TelemetryKind;
    ///
    /// let hierarchy = TelemetryKind::Traces.hierarchy();
    /// assert_eq!(hierarchy.resources, "resourceSpans");
    /// assert_eq!(hierarchy.records, "spans");
    /// ```
    #[must_use]
    pub fn hierarchy(self) -> Hierarchy {
        match self {
            Self::Logs => Hierarchy {
                resources: "resourceLogs",
                scopes: "scopeLogs",
                records: "logRecords",
            },
            Self::Metrics => Hierarchy {
                resources: "resourceMetrics",
                scopes: "scopeMetrics",
                records: "metrics",
            },
            Self::Traces => Hierarchy {
                resources: "resourceSpans",
                scopes: "scopeSpans",
                records: "spans",
            },
        }
    }

    /// Infers the kind of an OTLP/JSON document from its root key.
    #[must_use]
    pub fn detect(document: &Value) -> Option<Self> {
        let root = document.as_object()?;
        Self::ALL
            .into_iter()
            .find(|kind| root.contains_key(kind.hierarchy().resources))
    }
}

impl fmt::Display for TelemetryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logs => write!(f, "logs"),
            Self::Metrics => write!(f, "metrics"),
            Self::Traces => write!(f, "traces"),
        }
    }
}

impl FromStr for TelemetryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logs" => Ok(Self::Logs),
            "metrics" => Ok(Self::Metrics),
            "traces" => Ok(Self::Traces),
            _ => Err(format!(
                "unknown telemetry kind '{s}' (expected logs, metrics or traces)"
            )),
        }
    }
}

/// The five mutually exclusive data-point containers a metric may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataPointKind {
    /// `gauge.dataPoints`
    Gauge,
    /// `sum.dataPoints`
    Sum,
    /// `histogram.dataPoints`
    Histogram,
    /// `exponentialHistogram.dataPoints`
    ExponentialHistogram,
    /// `summary.dataPoints`
    Summary,
}

impl DataPointKind {
    /// All data-point kinds, in OTLP field order.
    pub const ALL: [Self; 5] = [
        Self::Gauge,
        Self::Sum,
        Self::Histogram,
        Self::ExponentialHistogram,
        Self::Summary,
    ];

    /// Field names under which a metric carries this container.
    ///
    /// The first entry is the OTLP/JSON name; the exponential histogram also
    /// accepts its protobuf field name.
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Gauge => &["gauge"],
            Self::Sum => &["sum"],
            Self::Histogram => &["histogram"],
            Self::ExponentialHistogram => &["exponentialHistogram", "exponential_histogram"],
            Self::Summary => &["summary"],
        }
    }
}
