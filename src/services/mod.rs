//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and error mapping.

pub mod alert;
pub mod case;
pub mod export;
pub mod feed;
pub mod inbox;
pub mod pulse;
pub mod share;
pub mod upload;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Current UTC time as RFC 3339 text, the storage format for timestamps.
#[must_use]
pub(crate) fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}
