//! Data structures: the remote wire format ([`wire`]) and the local tri-state models
//! the host persists ([`user`], [`execution`]).

pub mod execution;
pub mod user;
pub mod wire;

pub use execution::*;
pub use user::*;

use chrono::{DateTime, SecondsFormat, Utc};
use reconcile_framework::{Field, Nullable};

/// Remote timestamp as a local RFC 3339 string.
pub(crate) fn timestamp(value: Option<&DateTime<Utc>>) -> Field<String> {
    Field::from_option(value.map(rfc3339))
}

/// Explicit-nullable remote timestamp. Unset and null both map to `Null`.
pub(crate) fn nullable_timestamp(value: &Nullable<DateTime<Utc>>) -> Field<String> {
    Field::from_nullable(value.clone()).map(|ts| rfc3339(&ts))
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
