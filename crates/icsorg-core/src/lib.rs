//! Core types: time window, canonical events, org-mode formatting

pub mod event;
pub mod format;
pub mod time;
pub mod tracing;

pub use event::{Attendee, Duration, Event};
pub use format::{
    OrgHeader, TimestampKind, capitalize, daily_file_name, format_duration, format_range,
    format_timestamp, linkify, note_file_name, render_aggregate, render_daily_entry,
    render_daily_header, render_entry, render_header, render_note, slugify,
};
pub use time::TimeWindow;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
