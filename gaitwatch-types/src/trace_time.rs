//! Trace timestamp formatting.
//!
//! The monitoring endpoint identifies each trace sample by an integer whose
//! trailing digits encode the time of day. Hours are everything before the
//! last 12 digits, minutes and seconds the next two pairs; the remaining 8
//! digits are sub-second and dropped. Two samples that format to the same
//! text fall into the same one-second bucket.

/// Format a raw trace timestamp as `H:MM:SS` text.
///
/// The transform is positional on the decimal digits, counted from the end:
/// `digits[..n-12] : digits[n-12..n-10] : digits[n-10..n-8]`. Offsets that
/// fall before the start of the string clamp to the start, so short inputs
/// yield empty components rather than an error.
///
/// ```rust
/// use gaitwatch_types::format_trace_time;
///
/// assert_eq!(format_trace_time(93_015_00000000), "9:30:15");
/// assert_eq!(format_trace_time(42), "::");
/// ```
pub fn format_trace_time(raw: u64) -> String {
    let digits = raw.to_string();
    let n = digits.len();

    let hours_end = n.saturating_sub(12);
    let minutes_end = n.saturating_sub(10);
    let seconds_end = n.saturating_sub(8);

    format!(
        "{}:{}:{}",
        &digits[..hours_end],
        &digits[hours_end..minutes_end],
        &digits[minutes_end..seconds_end]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifteen_digit_trace_id() {
        assert_eq!(format_trace_time(123456789012345), "123:45:67");
    }

    #[test]
    fn test_sub_second_digits_are_dropped() {
        // Same second, different sub-second part.
        assert_eq!(format_trace_time(14_05_09_00000001), format_trace_time(14_05_09_99999999));
        assert_eq!(format_trace_time(14_05_09_12345678), "14:05:09");
    }

    #[test]
    fn test_short_inputs_clamp() {
        assert_eq!(format_trace_time(0), "::");
        assert_eq!(format_trace_time(123456789), "::1");
        assert_eq!(format_trace_time(12345678901), ":1:23");
        assert_eq!(format_trace_time(123456789012), ":12:34");
    }

    #[test]
    fn test_large_magnitude() {
        assert_eq!(format_trace_time(u64::MAX), "18446744:07:37");
    }
}
