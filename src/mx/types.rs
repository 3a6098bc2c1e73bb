use std::fmt;
use std::time::Duration;

use trust_dns_resolver::proto::rr::RecordType;

/// One entry of the answer section returned for an MX query.
///
/// The answer section may carry other record types (a `CNAME` chain for
/// instance), and a malformed upstream may omit fields, hence the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxAnswer {
    pub record_type: RecordType,
    pub priority: Option<u16>,
    pub server: Option<String>,
}

impl MxAnswer {
    pub fn new(priority: u16, server: impl Into<String>) -> Self {
        Self {
            record_type: RecordType::MX,
            priority: Some(priority),
            server: Some(server.into()),
        }
    }
}

/// Outcome of resolving the mail exchanger of a single domain.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MxResult {
    /// Lowest-priority exchange, lowercased, without trailing dot.
    Host(String),
    /// The domain answered but publishes no MX record.
    Empty,
    /// Lookup errored or timed out.
    Failed,
}

impl MxResult {
    pub const FAILED_LABEL: &'static str = "failed";

    /// Value written in the `mx` column.
    pub fn as_field(&self) -> &str {
        match self {
            Self::Host(host) => host.as_str(),
            Self::Empty => "",
            Self::Failed => Self::FAILED_LABEL,
        }
    }

    pub fn host(&self) -> Option<&str> {
        match self {
            Self::Host(host) => Some(host.as_str()),
            Self::Empty | Self::Failed => None,
        }
    }
}

impl fmt::Display for MxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(host) => f.write_str(host),
            Self::Empty => f.write_str("<no MX record>"),
            Self::Failed => f.write_str(Self::FAILED_LABEL),
        }
    }
}

/// Knobs for MX resolution and the per-batch fan-out.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    pub timeout_ms: u64,
    /// Maximum number of DNS queries in flight for one batch.
    pub concurrency: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 2_000,
            concurrency: 128,
        }
    }
}

impl LookupOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Fan-out width, never below one.
    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
