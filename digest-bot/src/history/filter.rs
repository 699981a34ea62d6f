//! Message selection for a summary request.
//!
//! Two stages, always in this order:
//!
//! 1. **Last read** (only when `from_last_read`): with a cursor at `T` keep messages strictly
//!    after `T`; without a cursor keep the last [`FIRST_READ_FALLBACK`] messages.
//! 2. **Time window** on the stage-1 output: `today` keeps messages since local midnight,
//!    `last_hour` / `last_2_hours` / `last_day` keep messages at or after `now - window`,
//!    `all` keeps everything but is capped to the last [`ALL_MESSAGES_CAP`] when
//!    `from_last_read` is off, and any other value passes through.
//!
//! The cursor boundary is exclusive and window boundaries are inclusive.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};

use super::cursor::ReadCursorTracker;
use super::message::Message;

/// Messages kept for a last-read request from a user who has no cursor yet.
pub const FIRST_READ_FALLBACK: usize = 50;

/// Messages kept for `all` without last-read.
pub const ALL_MESSAGES_CAP: usize = 100;

/// Time window requested by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeFilter {
    Today,
    LastHour,
    LastTwoHours,
    LastDay,
    All,
    /// A value the relay does not know; selects nothing out.
    Unrecognized(String),
}

impl TimeFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "today" => Self::Today,
            "last_hour" => Self::LastHour,
            "last_2_hours" => Self::LastTwoHours,
            "last_day" => Self::LastDay,
            "all" => Self::All,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Today => "today",
            Self::LastHour => "last_hour",
            Self::LastTwoHours => "last_2_hours",
            Self::LastDay => "last_day",
            Self::All => "all",
            Self::Unrecognized(value) => value,
        }
    }

    /// Inclusive lower bound of the window, or `None` when the filter does not bound by time.
    pub fn cutoff<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        let now_utc = now.with_timezone(&Utc);
        match self {
            Self::Today => Some(start_of_day(now)),
            Self::LastHour => Some(now_utc - Duration::hours(1)),
            Self::LastTwoHours => Some(now_utc - Duration::hours(2)),
            Self::LastDay => Some(now_utc - Duration::days(1)),
            Self::All | Self::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 00:00:00 of `now`'s day in `now`'s time zone. On days where local midnight does not exist
/// (DST gap) this is `now` minus the seconds elapsed since midnight.
fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| now.timezone().from_local_datetime(&naive).earliest());
    match midnight {
        Some(t) => t.with_timezone(&Utc),
        None => {
            now.with_timezone(&Utc)
                - Duration::seconds(i64::from(now.num_seconds_from_midnight()))
                - Duration::nanoseconds(i64::from(now.nanosecond() % 1_000_000_000))
        }
    }
}

fn last_n(messages: &[Message], n: usize) -> &[Message] {
    &messages[messages.len().saturating_sub(n)..]
}

/// Applies both stages to `log` (oldest first) and returns the selection in the same order.
///
/// `cursor` is only consulted when `from_last_read` is set; `now` fixes the clock and the
/// local day for `today`.
pub fn filter_messages<Tz: TimeZone>(
    log: &[Message],
    cursor: Option<DateTime<Utc>>,
    time_filter: &TimeFilter,
    from_last_read: bool,
    now: &DateTime<Tz>,
) -> Vec<Message> {
    let stage_one: Vec<Message> = if from_last_read {
        match cursor {
            Some(last_read) => log
                .iter()
                .filter(|m| m.timestamp > last_read)
                .cloned()
                .collect(),
            None => last_n(log, FIRST_READ_FALLBACK).to_vec(),
        }
    } else {
        log.to_vec()
    };

    match time_filter.cutoff(now) {
        Some(cutoff) => stage_one
            .into_iter()
            .filter(|m| m.timestamp >= cutoff)
            .collect(),
        None if *time_filter == TimeFilter::All && !from_last_read => {
            last_n(&stage_one, ALL_MESSAGES_CAP).to_vec()
        }
        None => stage_one,
    }
}

/// [`filter_messages`] with the cursor looked up for `(user_id, conversation_id)`.
pub async fn filter_for_user<Tz: TimeZone>(
    cursors: &ReadCursorTracker,
    log: &[Message],
    user_id: &str,
    conversation_id: &str,
    time_filter: &TimeFilter,
    from_last_read: bool,
    now: &DateTime<Tz>,
) -> Vec<Message> {
    let cursor = if from_last_read {
        cursors.get(user_id, conversation_id).await
    } else {
        None
    };
    filter_messages(log, cursor, time_filter, from_last_read, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn msg(text: &str, t: DateTime<Utc>) -> Message {
        Message::new("u", "Alice", text, t)
    }

    fn texts(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    fn numbered(count: usize, start: DateTime<Utc>) -> Vec<Message> {
        (0..count)
            .map(|i| msg(&i.to_string(), start + Duration::seconds(i as i64)))
            .collect()
    }

    #[test]
    fn test_parse_round_trips_known_values() {
        for value in ["today", "last_hour", "last_2_hours", "last_day", "all"] {
            assert_eq!(TimeFilter::parse(value).as_str(), value);
        }
        assert_eq!(
            TimeFilter::parse("last_week"),
            TimeFilter::Unrecognized("last_week".to_string())
        );
    }

    #[test]
    fn test_cursor_boundary_is_strict() {
        let t = base();
        let log = vec![
            msg("A", t),
            msg("B", t + Duration::seconds(1)),
            msg("C", t + Duration::seconds(2)),
            msg("D", t + Duration::seconds(3)),
        ];
        let out = filter_messages(
            &log,
            Some(t + Duration::seconds(1)),
            &TimeFilter::All,
            true,
            &(t + Duration::seconds(10)),
        );
        assert_eq!(texts(&out), vec!["C", "D"]);
    }

    #[test]
    fn test_no_cursor_falls_back_to_last_fifty() {
        let log = numbered(120, base());
        let out = filter_messages(&log, None, &TimeFilter::All, true, &base());
        assert_eq!(out.len(), FIRST_READ_FALLBACK);
        assert_eq!(out[0].text, "70");
        assert_eq!(out[49].text, "119");
    }

    #[test]
    fn test_cursor_ignored_without_from_last_read() {
        let log = numbered(3, base());
        let out = filter_messages(
            &log,
            Some(base() + Duration::hours(1)),
            &TimeFilter::All,
            false,
            &base(),
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_all_without_last_read_caps_to_hundred() {
        let log = numbered(150, base());
        let out = filter_messages(&log, None, &TimeFilter::All, false, &base());
        assert_eq!(out.len(), ALL_MESSAGES_CAP);
        assert_eq!(out[0].text, "50");
        assert_eq!(out[99].text, "149");
    }

    #[test]
    fn test_all_with_cursor_is_not_capped() {
        let log = numbered(150, base());
        let out = filter_messages(
            &log,
            Some(base() - Duration::seconds(1)),
            &TimeFilter::All,
            true,
            &base(),
        );
        assert_eq!(out.len(), 150);
    }

    #[test]
    fn test_last_hour_window_is_inclusive() {
        let now = base();
        let log = vec![
            msg("old", now - Duration::minutes(61)),
            msg("edge", now - Duration::hours(1)),
            msg("new", now - Duration::minutes(5)),
        ];
        let out = filter_messages(&log, None, &TimeFilter::LastHour, false, &now);
        assert_eq!(texts(&out), vec!["edge", "new"]);
    }

    #[test]
    fn test_last_two_hours_and_last_day() {
        let now = base();
        let log = vec![
            msg("d2", now - Duration::hours(30)),
            msg("h3", now - Duration::hours(3)),
            msg("h1", now - Duration::minutes(90)),
        ];
        let two_hours = filter_messages(&log, None, &TimeFilter::LastTwoHours, false, &now);
        assert_eq!(texts(&two_hours), vec!["h1"]);
        let day = filter_messages(&log, None, &TimeFilter::LastDay, false, &now);
        assert_eq!(texts(&day), vec!["h3", "h1"]);
    }

    #[test]
    fn test_today_uses_local_midnight() {
        // 01:30 at UTC+2 is 23:30 UTC of the previous day; local midnight is 22:00 UTC.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 5, 2, 1, 30, 0).unwrap();
        let midnight_utc = Utc.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap();
        let log = vec![
            msg("yesterday", midnight_utc - Duration::seconds(1)),
            msg("midnight", midnight_utc),
            msg("now", now.with_timezone(&Utc)),
        ];
        let out = filter_messages(&log, None, &TimeFilter::Today, false, &now);
        assert_eq!(texts(&out), vec!["midnight", "now"]);
    }

    #[test]
    fn test_fallback_then_window() {
        let now = base();
        let mut log = numbered(60, now - Duration::hours(5));
        log.push(msg("recent", now - Duration::minutes(1)));
        let out = filter_messages(&log, None, &TimeFilter::LastHour, true, &now);
        assert_eq!(texts(&out), vec!["recent"]);
    }

    #[test]
    fn test_unrecognized_passes_through() {
        let log = numbered(150, base());
        let out = filter_messages(
            &log,
            None,
            &TimeFilter::Unrecognized("fortnight".to_string()),
            false,
            &base(),
        );
        assert_eq!(out.len(), 150);
    }

    #[test]
    fn test_empty_log() {
        let out = filter_messages(&[], None, &TimeFilter::Today, true, &base());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_filter_for_user_reads_cursor() {
        let tracker = ReadCursorTracker::new();
        let log = numbered(5, base());
        tracker
            .mark_read("u1", "g1", base() + Duration::seconds(2))
            .await;
        let out =
            filter_for_user(&tracker, &log, "u1", "g1", &TimeFilter::All, true, &base()).await;
        assert_eq!(texts(&out), vec!["3", "4"]);
        let other =
            filter_for_user(&tracker, &log, "u2", "g1", &TimeFilter::All, true, &base()).await;
        assert_eq!(other.len(), 5);
    }
}
