//! String-to-value conversions shared by the accessors and struct binding.

use std::fmt;
use std::time::Duration;

/// Largest duration accepted by [`parse_duration`], in nanoseconds.
const MAX_DURATION_NANOS: u128 = i64::MAX as u128;

/// Maximum fractional digits kept when parsing a duration; the rest are
/// below nanosecond resolution for every unit.
const MAX_FRACTION_DIGITS: u32 = 18;

/// Parses a boolean from common textual forms.
///
/// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
///
/// # Examples
///
/// ```
/// use layerconf::coerce::parse_bool;
///
/// assert_eq!(parse_bool("YES"), Some(true));
/// assert_eq!(parse_bool("off"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses a boolean the way struct binding does.
///
/// The strict literals `1 t T TRUE true True` and `0 f F FALSE false False`
/// are tried first. Failing that, `yes`, `on` and `1` (any case) are true and
/// every other value is false. This never fails.
#[must_use]
pub fn parse_bool_literal(s: &str) -> bool {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        other => matches!(other.to_lowercase().as_str(), "yes" | "on" | "1"),
    }
}

/// Error returned by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationError {
    input: String,
    reason: &'static str,
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid duration \"{}\": {}", self.input, self.reason)
    }
}

impl std::error::Error for DurationError {}

/// Parses a duration literal such as `30s`, `1h30m`, `1.5h` or `250ms`.
///
/// A literal is an optional `+` followed by one or more groups of a decimal
/// number (fraction allowed) and a unit: `ns`, `us` (or `µs`), `ms`, `s`,
/// `m`, `h`. The bare string `0` is also accepted. Negative durations and
/// values beyond roughly 292 years are rejected.
///
/// # Errors
///
/// Returns a [`DurationError`] describing the first problem found.
///
/// # Examples
///
/// ```
/// use layerconf::coerce::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
/// assert!(parse_duration("30").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let fail = |reason| DurationError {
        input: input.to_string(),
        reason,
    };

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(fail("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, fraction, scale, after_number) = split_number(rest).ok_or_else(|| fail("expected a number"))?;

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, after_unit) = after_number.split_at(unit_len);
        let unit_nanos = unit_nanos(unit).ok_or_else(|| {
            if unit.is_empty() {
                fail("missing unit")
            } else {
                fail("unknown unit")
            }
        })?;

        total = whole
            .checked_mul(unit_nanos)
            .and_then(|n| total.checked_add(n))
            .and_then(|n| n.checked_add(fraction.checked_mul(unit_nanos)? / scale))
            .ok_or_else(|| fail("value out of range"))?;
        if total > MAX_DURATION_NANOS {
            return Err(fail("value out of range"));
        }

        rest = after_unit;
    }

    if negative && total > 0 {
        return Err(fail("negative durations are not supported"));
    }

    let secs = u64::try_from(total / 1_000_000_000).map_err(|_| fail("value out of range"))?;
    // The remainder is always below one billion.
    #[allow(clippy::cast_possible_truncation)]
    let nanos = (total % 1_000_000_000) as u32;
    Ok(Duration::new(secs, nanos))
}

/// Splits a leading `123.456` number off `s`.
///
/// Returns `(whole, fraction, fraction_scale, rest)`, or `None` when there is
/// no digit on either side of the point.
fn split_number(s: &str) -> Option<(u128, u128, u128, &str)> {
    let int_len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (int_part, mut rest) = s.split_at(int_len);

    let mut whole: u128 = 0;
    for digit in int_part.bytes() {
        whole = whole
            .checked_mul(10)?
            .checked_add(u128::from(digit - b'0'))?;
    }

    let mut fraction: u128 = 0;
    let mut scale: u128 = 1;
    let mut has_fraction = false;
    if let Some(after_point) = rest.strip_prefix('.') {
        let frac_len = after_point
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_point.len());
        let (frac_part, after) = after_point.split_at(frac_len);
        has_fraction = !frac_part.is_empty();
        for digit in frac_part.bytes().take(MAX_FRACTION_DIGITS as usize) {
            fraction = fraction * 10 + u128::from(digit - b'0');
            scale *= 10;
        }
        rest = after;
    }

    if int_part.is_empty() && !has_fraction {
        return None;
    }
    Some((whole, fraction, scale, rest))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Renders a duration in the literal syntax accepted by [`parse_duration`].
///
/// # Examples
///
/// ```
/// use layerconf::coerce::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m0s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// assert_eq!(format_duration(Duration::ZERO), "0s");
/// ```
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}\u{00b5}s", with_fraction(nanos / 1_000, nanos % 1_000, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", with_fraction(nanos / 1_000_000, nanos % 1_000_000, 6));
    }

    let secs = d.as_secs();
    let seconds = with_fraction(u128::from(secs % 60), u128::from(d.subsec_nanos()), 9);
    let hours = secs / 3_600;
    let minutes = (secs / 60) % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Formats `whole.frac` where `frac` has `digits` digits, trimming zeros.
fn with_fraction(whole: u128, frac: u128, digits: usize) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0digits$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}


// Property-based tests for coercion helpers
#[cfg(all(test, feature = "property-tests"))]
#[allow(unused_doc_comments)] // proptest! macro doesn't support doc comments
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Property: boolean parsing is case-insensitive for every accepted word.
    proptest! {
        #[test]
        fn prop_bool_parsing_case_insensitive(use_uppercase in any::<bool>()) {
            for (word, expected) in [
                ("true", true), ("1", true), ("yes", true), ("on", true),
                ("false", false), ("0", false), ("no", false), ("off", false),
            ] {
                let input = if use_uppercase { word.to_uppercase() } else { word.to_string() };
                prop_assert_eq!(parse_bool(&input), Some(expected), "{}", input);
            }
        }
    }

    /// Property: strings outside the accepted vocabulary never parse.
    proptest! {
        #[test]
        fn prop_bool_rejects_other_words(s in "[a-z]{2,8}") {
            let accepted = ["true", "yes", "on", "false", "no", "off"];
            prop_assume!(!accepted.contains(&s.as_str()));
            prop_assert_eq!(parse_bool(&s), None);
        }
    }

    /// Property: formatting then parsing a duration is lossless.
    proptest! {
        #[test]
        fn prop_duration_format_parse_roundtrip(secs in 0u64..10_000_000, nanos in 0u32..1_000_000_000) {
            let d = Duration::new(secs, nanos);
            let text = format_duration(d);
            prop_assert_eq!(parse_duration(&text).unwrap(), d, "{}", text);
        }
    }

    /// Property: whole seconds written with the `s` unit parse exactly.
    proptest! {
        #[test]
        fn prop_duration_seconds(secs in 0u64..1_000_000) {
            prop_assert_eq!(parse_duration(&format!("{secs}s")).unwrap(), Duration::from_secs(secs));
        }
    }
}
