//! Repository modules. Each adds an `impl DinrDb` block for one entity.

pub mod group;
pub mod lock;
pub mod option;
pub mod session;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamp encoding used for every TEXT time column.
///
/// Fixed-width microseconds in UTC, so lexical order matches time order and
/// a value read back compares equal to the one written.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
