//! Calendar retrieval, expansion and normalization.
//!
//! This crate turns a calendar source into canonical events:
//!
//! - [`fetch`] - Reads raw calendar text from a URL or file
//! - [`expand`] - Parses the text and expands recurrences into raw records
//! - [`normalize_all`] - Converts raw records into [`icsorg_core::Event`]s
//! - [`ProviderError`] - Error types for everything before rendering
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   HTTP(S) URL   │    │   Local file    │
//! └────────┬────────┘    └────────┬────────┘
//!          │        fetch()       │
//!          └──────────┬───────────┘
//!                     ▼
//!              ┌─────────────┐
//!              │  ICS text   │
//!              └──────┬──────┘
//!                     ▼ expand()
//!        ┌────────────┴─────────────┐
//!        ▼                          ▼
//! ┌──────────────┐        ┌──────────────────┐
//! │ EventRecord  │        │ OccurrenceRecord │
//! └──────┬───────┘        └────────┬─────────┘
//!        └────────────┬────────────┘
//!                     ▼ normalize_all()
//!              ┌─────────────┐
//!              │    Event    │
//!              └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use icsorg_core::TimeWindow;
//! use icsorg_providers::{expand, fetch, normalize_all, DEFAULT_MAX_ITERATIONS};
//!
//! async fn load(source: &str, window: TimeWindow) -> ProviderResult<Vec<Event>> {
//!     let text = fetch(Some(source)).await?;
//!     let records = expand(&text, &window, DEFAULT_MAX_ITERATIONS)?.into_records();
//!     Ok(normalize_all(&records, "Jane Doe", "jane.doe@example.com"))
//! }
//! ```

pub mod attendee;
pub mod error;
pub mod ics;
pub mod normalize;
pub mod property;
pub mod raw_event;
pub mod source;

// Re-export main types at crate root
pub use attendee::{resolve_attendee, resolve_attendees};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use ics::{DEFAULT_MAX_ITERATIONS, Expansion, expand, parse_calendar};
pub use normalize::{normalize, normalize_all};
pub use property::{IcsTime, PropertyValue, ValueKind, extract, parse_duration, unescape_text};
pub use raw_event::{
    EventRecord, OccurrenceRecord, RawAttendee, RawComponent, RawProperty, RawRecord,
};
pub use source::fetch;
