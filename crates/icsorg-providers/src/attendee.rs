//! Attendee resolution.
//!
//! Turns raw `ATTENDEE` lines into canonical [`Attendee`] values and marks
//! the configured user. Matching is exact string equality against the
//! configured author name or email; no case folding is applied.

use icsorg_core::Attendee;

use crate::raw_event::RawAttendee;

/// Status used when an attendee line has no `PARTSTAT`.
pub const DEFAULT_PARTSTAT: &str = "NEEDS-ACTION";

/// Resolves every raw attendee, preserving order.
pub fn resolve_attendees(raw: &[RawAttendee], author: &str, email: &str) -> Vec<Attendee> {
    raw.iter()
        .map(|attendee| resolve_attendee(attendee, author, email))
        .collect()
}

/// Resolves a single raw attendee.
///
/// The identity is the `CN` parameter, or the calendar address when the
/// line has none.
pub fn resolve_attendee(raw: &RawAttendee, author: &str, email: &str) -> Attendee {
    let cn = raw.cn.clone().unwrap_or_else(|| raw.address.clone());
    let status = raw
        .partstat
        .clone()
        .unwrap_or_else(|| DEFAULT_PARTSTAT.to_string());

    let me = is_me(&cn, author, email);

    let mut attendee = Attendee::new(cn, status).with_me(me);
    attendee.role = raw.role.clone();
    attendee.category = raw.cutype.clone();
    attendee.guests = raw.guests;
    attendee
}

/// Returns true if `cn` is exactly the configured author or email.
fn is_me(cn: &str, author: &str, email: &str) -> bool {
    cn == author || cn == email
}
