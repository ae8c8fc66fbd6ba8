//! Test fixtures and call generators.

use calls_core::{CallRecord, CallStatus, Direction, PeriodWindow};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// Exophone the generated calls are placed to.
pub const EXOPHONE: &str = "08047361499";

/// A second exophone, used to check filtering.
pub const OTHER_EXOPHONE: &str = "08030752400";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Week of 2025-10-16 to 2025-10-22.
pub fn current_week() -> PeriodWindow {
    PeriodWindow::new(date(2025, 10, 16), date(2025, 10, 22)).unwrap()
}

fn timestamp(window: &PeriodWindow, i: usize) -> DateTime<Utc> {
    let day = window.start + Duration::days(i as i64 % window.days());
    day.and_hms_opt(9, 0, 0).unwrap().and_utc() + Duration::minutes((i % 480) as i64)
}

/// An incoming answered call from `from` to the default exophone.
pub fn incoming_call(sid: &str, from: &str) -> CallRecord {
    CallRecord {
        sid: sid.to_string(),
        from: from.to_string(),
        to: EXOPHONE.to_string(),
        direction: Direction::Incoming,
        status: CallStatus::Answered,
        duration_secs: 60,
        started_at: Utc.with_ymd_and_hms(2025, 10, 20, 9, 30, 0).unwrap(),
    }
}

/// An outgoing call, which never gets a category.
pub fn outgoing_call(sid: &str, to: &str) -> CallRecord {
    CallRecord {
        sid: sid.to_string(),
        from: EXOPHONE.to_string(),
        to: to.to_string(),
        direction: Direction::Outgoing,
        status: CallStatus::NoAnswer,
        duration_secs: 0,
        started_at: Utc.with_ymd_and_hms(2025, 10, 20, 10, 0, 0).unwrap(),
    }
}

/// Ten-digit tenant number `i`.
pub fn tenant_number(i: usize) -> String {
    format!("98{:08}", i)
}

/// Ten-digit non-tenant number `i`.
pub fn stranger_number(i: usize) -> String {
    format!("70{:08}", i)
}

/// Generate `service` calls from tenant numbers and `enquiry` calls from
/// unknown numbers, spread across `window`.
///
/// Tenant numbers are written in mixed formats so classification has to
/// normalize them.
pub fn period_calls(
    prefix: &str,
    window: &PeriodWindow,
    service: usize,
    enquiry: usize,
) -> Vec<CallRecord> {
    let mut calls = Vec::with_capacity(service + enquiry);
    for i in 0..service {
        let number = tenant_number(i);
        let from = match i % 3 {
            0 => number,
            1 => format!("+91 {}", number),
            _ => format!("0{}", number),
        };
        let mut call = incoming_call(&format!("{}-s{}", prefix, i), &from);
        call.started_at = timestamp(window, i);
        calls.push(call);
    }
    for i in 0..enquiry {
        let mut call = incoming_call(&format!("{}-e{}", prefix, i), &stranger_number(i));
        call.started_at = timestamp(window, service + i);
        calls.push(call);
    }
    calls
}
