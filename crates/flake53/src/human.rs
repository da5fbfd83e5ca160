use crate::{
    error::{Error, Result},
    id::FlakeParts,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Width of the human-readable form: 14 timestamp digits + 5 sequence
/// digits + 2 node digits.
pub const HUMAN_LEN: usize = 21;

const TIME_FORMAT: &str = "%Y%m%d%H%M%S";

// The timestamp prefix is rendered at a fixed UTC+8 offset (CST),
// independent of the host timezone, so the form is stable across machines.
fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid offset")
}

/// Renders decoded identifier components as a fixed 21-character string:
/// `YYYYMMDDhhmmss` local time at UTC+8, then the zero-padded 5-digit
/// sequence and 2-digit node.
///
/// The output is always exactly [`HUMAN_LEN`] characters for components
/// produced by [`decode`](crate::FlakeGenerator::decode) under a sane epoch.
///
/// # Example
/// ```
/// use flake53::{FlakeParts, format_parts};
///
/// let text = format_parts(FlakeParts {
///     seconds: 1_700_000_000,
///     sequence: 7,
///     node: 3,
/// });
/// assert_eq!(text, "202311150613200000703");
/// assert_eq!(text.len(), 21);
/// ```
pub fn format_parts(parts: FlakeParts) -> String {
    let seconds = i64::try_from(parts.seconds).expect("seconds fit in i64");
    let local = DateTime::from_timestamp(seconds, 0)
        .expect("53-bit seconds are within chrono's range")
        .with_timezone(&display_offset());
    format!(
        "{}{:05}{:02}",
        local.format(TIME_FORMAT),
        parts.sequence,
        parts.node
    )
}

/// Parses the fixed 21-character human-readable form back into identifier
/// components.
///
/// # Errors
///
/// - [`Error::MalformedHuman`] if the input is not exactly 21 ascii
///   characters
/// - [`Error::InvalidHumanTimestamp`] if the 14-digit prefix is not a valid
///   UTC+8 local time at or after the Unix epoch
/// - [`Error::InvalidHumanField`] if the sequence or node digits fail to
///   parse
///
/// # Example
/// ```
/// use flake53::parse_human;
///
/// let parts = parse_human("202311150613200000703").unwrap();
/// assert_eq!(parts.seconds, 1_700_000_000);
/// assert_eq!(parts.sequence, 7);
/// assert_eq!(parts.node, 3);
/// ```
pub fn parse_human(text: &str) -> Result<FlakeParts> {
    if text.len() != HUMAN_LEN || !text.is_ascii() {
        return Err(Error::MalformedHuman { len: text.len() });
    }

    let naive = NaiveDateTime::parse_from_str(&text[..14], TIME_FORMAT)
        .map_err(|_| Error::InvalidHumanTimestamp)?;
    let local = naive
        .and_local_timezone(display_offset())
        .single()
        .ok_or(Error::InvalidHumanTimestamp)?;
    let seconds =
        u64::try_from(local.timestamp()).map_err(|_| Error::InvalidHumanTimestamp)?;

    Ok(FlakeParts {
        seconds,
        sequence: parse_field(&text[14..19], "sequence")?,
        node: parse_field(&text[19..21], "node")?,
    })
}

/// Permissive variant of [`parse_human`]: any error maps to all-zero
/// components.
///
/// Provided for callers that want the silent-failure contract; new code
/// should prefer the fallible form.
pub fn parse_human_lossy(text: &str) -> FlakeParts {
    parse_human(text).unwrap_or_default()
}

fn parse_field(digits: &str, field: &'static str) -> Result<u64> {
    digits
        .parse()
        .map_err(|_| Error::InvalidHumanField { field })
}
