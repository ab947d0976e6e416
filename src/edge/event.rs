//! Serde model of the origin-request event the edge runtime hands us.
//!
//! The gate interprets only the `authorization` and `www-authenticate`
//! headers. Every other field of the event is carried in flattened
//! passthrough maps and survives a forward untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One invocation event. The runtime delivers exactly one request record
/// per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "Records")]
    pub records: Vec<Record>,
}

impl Event {
    /// Consumes the event and returns the request of its first record.
    pub fn into_request(self) -> Option<EdgeRequest> {
        self.records
            .into_iter()
            .next()
            .map(|record| record.cf.request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub cf: CfRecord,
}

/// The `cf` block of a record. Besides the request it carries distribution
/// metadata (`config`) the gate never reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfRecord {
    pub request: EdgeRequest,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// The inbound request. Only `headers` is interpreted; `uri`, `method`,
/// `clientIp`, `querystring`, `origin` and anything else the runtime adds
/// stay in `rest` and are forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub headers: Headers,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Header map: lower-cased header name to the list of `{key, value}` pairs
/// recorded for that name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<String, Vec<HeaderEntry>>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

impl Headers {
    /// First value recorded under `name`. The lookup is case-insensitive;
    /// an entry with an empty value list counts as absent.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(stored, _)| stored.eq_ignore_ascii_case(name))
            .and_then(|(_, entries)| entries.first())
            .map(|entry| entry.value.as_str())
    }

    /// Removes every entry recorded under `name`, case-insensitively.
    pub fn remove(&mut self, name: &str) -> Option<Vec<HeaderEntry>> {
        let stored: Vec<String> = self
            .0
            .keys()
            .filter(|stored| stored.eq_ignore_ascii_case(name))
            .cloned()
            .collect();

        let mut removed = None;
        for key in stored {
            let entries = self.0.remove(&key);
            if removed.is_none() {
                removed = entries;
            }
        }
        removed
    }

    /// Sets `name` to a single entry, storing the lower-cased name the way
    /// the runtime does.
    pub fn set(&mut self, name: &str, entry: HeaderEntry) {
        self.0.insert(name.to_ascii_lowercase(), vec![entry]);
    }
}

/// Terminal response returned to the runtime on the deny path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeResponse {
    pub status: String,
    #[serde(rename = "statusDescription")]
    pub status_description: String,
    pub headers: Headers,
    pub body: String,
}

/// Outcome of an invocation. The runtime receives either the request to
/// forward or a terminal response, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Verdict {
    Forward(EdgeRequest),
    Deny(EdgeResponse),
}
