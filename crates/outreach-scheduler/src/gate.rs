//! Time-of-day gate for senior outreach.
//!
//! Pure function of the local hour: nothing before 08:00 or after 21:59, and
//! within that curfew only the windows where a call or email is welcome.

use chrono::{DateTime, Local, Timelike};

/// Inclusive hour ranges considered appropriate for senior outreach:
/// morning coffee, after lunch, early evening.
pub const SENIOR_FRIENDLY_WINDOWS: [(u32, u32); 3] = [(9, 11), (13, 15), (18, 20)];

/// Hours outside `[EARLIEST_HOUR, LATEST_HOUR]` are always blocked.
pub const EARLIEST_HOUR: u32 = 8;
pub const LATEST_HOUR: u32 = 21;

/// Whether `hour` (0–23) falls inside an outreach window.
pub fn is_outreach_hour(hour: u32) -> bool {
    if hour < EARLIEST_HOUR || hour > LATEST_HOUR {
        return false;
    }
    SENIOR_FRIENDLY_WINDOWS
        .iter()
        .any(|&(start, end)| (start..=end).contains(&hour))
}

/// Gate check against a wall-clock instant (local time).
pub fn is_outreach_time(now: DateTime<Local>) -> bool {
    is_outreach_hour(now.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_hours_are_open() {
        for hour in [9, 10, 11, 13, 14, 15, 18, 19, 20] {
            assert!(is_outreach_hour(hour), "hour {hour} should be open");
        }
    }

    #[test]
    fn curfew_hours_are_blocked() {
        for hour in [0, 5, 7, 22, 23] {
            assert!(!is_outreach_hour(hour), "hour {hour} should be blocked");
        }
    }

    #[test]
    fn gaps_between_windows_are_blocked() {
        // Inside the curfew bounds but outside every window.
        for hour in [8, 12, 16, 17, 21] {
            assert!(!is_outreach_hour(hour), "hour {hour} should be blocked");
        }
    }
}
