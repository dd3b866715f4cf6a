//! Day merger
//!
//! Consecutive session blocks for the same child (one ending exactly when
//! the next starts) are presented as a single booking.

use std::collections::HashMap;

use bookingcal_domain::{MergedBooking, RawSession};

/// Coalesce one day's sessions into merged bookings, in start order.
///
/// Sessions are grouped per child identifier. A session that starts at or
/// before the end of that child's running window extends it; any gap starts
/// a new booking. Other children's sessions in between do not break a chain.
pub fn merge_day(sessions: &[RawSession]) -> Vec<MergedBooking> {
    let mut ordered: Vec<&RawSession> = sessions.iter().collect();
    ordered.sort_by_key(|s| (s.calendar_date, s.start, s.end));

    let mut merged: Vec<MergedBooking> = Vec::with_capacity(ordered.len());
    let mut open: HashMap<(&str, chrono::NaiveDate), usize> = HashMap::new();

    for session in ordered {
        let start = session.calendar_date.and_time(session.start);
        let end = session.calendar_date.and_time(session.end);
        let key = (session.child_identifier.as_str(), session.calendar_date);

        if let Some(&idx) = open.get(&key) {
            let current = &mut merged[idx];
            if start <= current.end {
                current.end = current.end.max(end);
                continue;
            }
        }

        merged.push(MergedBooking {
            child_identifier: session.child_identifier.clone(),
            start,
            end,
        });
        open.insert(key, merged.len() - 1);
    }

    merged
}
