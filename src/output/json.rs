//! JSON output
//!
//! Every JSON document the CLI prints has the same envelope:
//!
//! ```json
//! { "data": ..., "meta": { "timestamp": "...", "version": "0.1.0", "count": 2 } }
//! ```
//!
//! `count` is only present for member listings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Borrowed envelope around the payload
#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    data: &'a T,
    meta: Meta,
}

#[derive(Serialize)]
struct Meta {
    #[serde(serialize_with = "rfc3339")]
    timestamp: DateTime<Utc>,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

fn rfc3339<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn render<T: Serialize + ?Sized>(data: &T, count: Option<usize>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope {
        data,
        meta: Meta {
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            count,
        },
    })
}

/// Print-ready JSON for a single record or result object
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    render(data, None)
}

/// Print-ready JSON for a listing; `meta.count` carries the row count
pub fn format_json_list<T: Serialize>(rows: &[T]) -> serde_json::Result<String> {
    render(rows, Some(rows.len()))
}
