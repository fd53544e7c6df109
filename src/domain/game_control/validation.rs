//! Game control validation

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Shortest allowed tick duration in seconds
pub const MIN_TICK_DURATION_SECS: u32 = 1;

/// Longest allowed tick duration in seconds. Ticks longer than one hour are
/// possible in principle but would require additional handling in the
/// controller's timer, so they are rejected here.
pub const MAX_TICK_DURATION_SECS: u32 = 3559;

/// Errors that can occur during game control validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameControlValidationError {
    #[error("Tick duration must be between {min} and {max} seconds, got {value}")]
    TickDurationOutOfRange { value: u32, min: u32, max: u32 },

    #[error("The tick duration has to evenly divide into or be a multiple of 60 seconds, got {0}")]
    TickDurationNotMinuteAligned(u32),

    #[error("Flags must be valid for at least one tick")]
    InvalidValidTicks,

    #[error("Services public time must not be after start time")]
    ServicesPublicAfterStart,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("End time requires a start time")]
    EndWithoutStart,

    #[error("Minimum and maximum net number must be set together")]
    IncompleteNetNumberRange,

    #[error("Minimum net number {min} exceeds maximum net number {max}")]
    NetNumberRangeInverted { min: i32, max: i32 },

    #[error("Net numbers must not be negative, got {0}")]
    NegativeNetNumber(i32),
}

/// Validate a tick duration in seconds.
///
/// The controller component schedules ticks with a timer configured through
/// fixed minute and second conditions, so the duration must represent the
/// interval exactly: durations below one minute must divide 60 evenly,
/// durations above one minute must be a multiple of 60.
pub fn validate_tick_duration(secs: u32) -> Result<(), GameControlValidationError> {
    if !(MIN_TICK_DURATION_SECS..=MAX_TICK_DURATION_SECS).contains(&secs) {
        return Err(GameControlValidationError::TickDurationOutOfRange {
            value: secs,
            min: MIN_TICK_DURATION_SECS,
            max: MAX_TICK_DURATION_SECS,
        });
    }

    if (secs < 60 && 60 % secs != 0) || (secs > 60 && secs % 60 != 0) {
        return Err(GameControlValidationError::TickDurationNotMinuteAligned(
            secs,
        ));
    }

    Ok(())
}

/// Validate the number of ticks a flag stays valid for
pub fn validate_valid_ticks(ticks: u32) -> Result<(), GameControlValidationError> {
    if ticks == 0 {
        return Err(GameControlValidationError::InvalidValidTicks);
    }

    Ok(())
}

/// Validate the ordering of the competition scheduling window.
///
/// Checks only apply to pairs of timestamps that are both set, except that an
/// end time without a start time is always rejected.
pub fn validate_schedule(
    services_public: Option<DateTime<Utc>>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), GameControlValidationError> {
    if end.is_some() && start.is_none() {
        return Err(GameControlValidationError::EndWithoutStart);
    }

    if let (Some(public), Some(start)) = (services_public, start) {
        if public > start {
            return Err(GameControlValidationError::ServicesPublicAfterStart);
        }
    }

    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            return Err(GameControlValidationError::EndNotAfterStart);
        }
    }

    Ok(())
}

/// Validate the optional inclusive net number range.
///
/// When the range is unset, team user IDs are used as net numbers directly.
pub fn validate_net_number_range(
    min: Option<i32>,
    max: Option<i32>,
) -> Result<(), GameControlValidationError> {
    match (min, max) {
        (None, None) => Ok(()),
        (Some(min), Some(max)) => {
            if min < 0 {
                return Err(GameControlValidationError::NegativeNetNumber(min));
            }

            if max < 0 {
                return Err(GameControlValidationError::NegativeNetNumber(max));
            }

            if min > max {
                return Err(GameControlValidationError::NetNumberRangeInverted { min, max });
            }

            Ok(())
        }
        _ => Err(GameControlValidationError::IncompleteNetNumberRange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 18, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_tick_duration_divisors_of_minute() {
        for secs in [1, 2, 5, 10, 15, 20, 30, 60] {
            assert!(validate_tick_duration(secs).is_ok(), "{} should pass", secs);
        }
    }

    #[test]
    fn test_tick_duration_multiples_of_minute() {
        for secs in [120, 180, 300, 600, 1800, 3540] {
            assert!(validate_tick_duration(secs).is_ok(), "{} should pass", secs);
        }
    }

    #[test]
    fn test_tick_duration_not_minute_aligned() {
        assert_eq!(
            validate_tick_duration(45),
            Err(GameControlValidationError::TickDurationNotMinuteAligned(45))
        );
        assert_eq!(
            validate_tick_duration(90),
            Err(GameControlValidationError::TickDurationNotMinuteAligned(90))
        );
        assert!(validate_tick_duration(7).is_err());
        assert!(validate_tick_duration(61).is_err());
    }

    #[test]
    fn test_tick_duration_out_of_range() {
        assert_eq!(
            validate_tick_duration(0),
            Err(GameControlValidationError::TickDurationOutOfRange {
                value: 0,
                min: 1,
                max: 3559,
            })
        );
        // 3600 would be minute-aligned but exceeds the maximum
        assert!(matches!(
            validate_tick_duration(3600),
            Err(GameControlValidationError::TickDurationOutOfRange { .. })
        ));
    }

    #[test]
    fn test_tick_duration_full_acceptance_table() {
        for t in 1..=MAX_TICK_DURATION_SECS {
            let expected = (t <= 60 && 60 % t == 0) || (t >= 60 && t % 60 == 0);
            assert_eq!(
                validate_tick_duration(t).is_ok(),
                expected,
                "mismatch at {}",
                t
            );
        }
    }

    #[test]
    fn test_schedule_valid() {
        assert!(validate_schedule(Some(at(9, 0)), Some(at(10, 0)), Some(at(11, 0))).is_ok());
    }

    #[test]
    fn test_schedule_services_public_equals_start() {
        assert!(validate_schedule(Some(at(10, 0)), Some(at(10, 0)), Some(at(11, 0))).is_ok());
    }

    #[test]
    fn test_schedule_services_public_after_start() {
        assert_eq!(
            validate_schedule(Some(at(10, 30)), Some(at(10, 0)), Some(at(11, 0))),
            Err(GameControlValidationError::ServicesPublicAfterStart)
        );
    }

    #[test]
    fn test_schedule_end_equals_start() {
        assert_eq!(
            validate_schedule(None, Some(at(10, 0)), Some(at(10, 0))),
            Err(GameControlValidationError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_schedule_end_before_start() {
        assert_eq!(
            validate_schedule(None, Some(at(10, 0)), Some(at(9, 0))),
            Err(GameControlValidationError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_schedule_end_without_start() {
        assert_eq!(
            validate_schedule(None, None, Some(at(11, 0))),
            Err(GameControlValidationError::EndWithoutStart)
        );
    }

    #[test]
    fn test_schedule_all_unset() {
        assert!(validate_schedule(None, None, None).is_ok());
    }

    #[test]
    fn test_net_number_range_unset() {
        assert!(validate_net_number_range(None, None).is_ok());
    }

    #[test]
    fn test_net_number_range_valid() {
        assert!(validate_net_number_range(Some(1), Some(255)).is_ok());
        assert!(validate_net_number_range(Some(5), Some(5)).is_ok());
    }

    #[test]
    fn test_net_number_range_incomplete() {
        assert_eq!(
            validate_net_number_range(Some(1), None),
            Err(GameControlValidationError::IncompleteNetNumberRange)
        );
        assert_eq!(
            validate_net_number_range(None, Some(255)),
            Err(GameControlValidationError::IncompleteNetNumberRange)
        );
    }

    #[test]
    fn test_net_number_range_inverted() {
        assert_eq!(
            validate_net_number_range(Some(10), Some(5)),
            Err(GameControlValidationError::NetNumberRangeInverted { min: 10, max: 5 })
        );
    }

    #[test]
    fn test_net_number_range_negative() {
        assert_eq!(
            validate_net_number_range(Some(-1), Some(5)),
            Err(GameControlValidationError::NegativeNetNumber(-1))
        );
    }

    #[test]
    fn test_valid_ticks() {
        assert!(validate_valid_ticks(1).is_ok());
        assert!(validate_valid_ticks(10).is_ok());
        assert_eq!(
            validate_valid_ticks(0),
            Err(GameControlValidationError::InvalidValidTicks)
        );
    }
}
