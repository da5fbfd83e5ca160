use crate::{
    error::{Error, Result},
    id::Flake,
};

/// Radix used by the convenience paths when none is specified.
pub const DEFAULT_RADIX: u32 = 36;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const NO_VALUE: u8 = 255;

/// Lookup table for digit decoding; upper-case letters alias their
/// lower-case value.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 36 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[(c - 32) as usize] = i;
        }
        i += 1;
    }
    lut
};

// 53 bits need at most 53 digits (radix 2).
const MAX_DIGITS: usize = 53;

const fn check_radix(radix: u32) -> Result<()> {
    if radix < 2 || radix > ALPHABET.len() as u32 {
        return Err(Error::RadixOutOfRange { radix });
    }
    Ok(())
}

/// Encodes an identifier as text in the given radix (`2..=36`).
///
/// Digits are `0-9` then `a-z`, with no padding or sign; zero encodes as
/// `"0"`. Radix 36 ([`DEFAULT_RADIX`]) yields the most compact transport
/// form — at most 11 characters for a 53-bit value.
///
/// # Errors
///
/// Returns [`Error::RadixOutOfRange`] if `radix` is outside `2..=36`.
///
/// # Example
/// ```
/// use flake53::{Flake, encode_radix};
///
/// let id = Flake::from_raw(255);
/// assert_eq!(encode_radix(id, 16).unwrap(), "ff");
/// assert_eq!(encode_radix(id, 2).unwrap(), "11111111");
/// ```
pub fn encode_radix(id: Flake, radix: u32) -> Result<String> {
    check_radix(radix)?;

    let mut value = id.to_raw();
    if value == 0 {
        return Ok("0".to_owned());
    }

    let radix = u64::from(radix);
    let mut buf = [0_u8; MAX_DIGITS];
    let mut at = buf.len();
    while value > 0 {
        at -= 1;
        buf[at] = ALPHABET[(value % radix) as usize];
        value /= radix;
    }

    Ok(core::str::from_utf8(&buf[at..])
        .expect("alphabet is ascii")
        .to_owned())
}

/// Parses an identifier from text in the given radix (`2..=36`).
///
/// Accepts upper- and lower-case digits. The value must fit in the 53-bit
/// id space.
///
/// # Errors
///
/// - [`Error::RadixOutOfRange`] if `radix` is outside `2..=36`
/// - [`Error::EmptyInput`] if `text` has no digits
/// - [`Error::InvalidDigit`] on the first byte that is not a digit of
///   `radix`
/// - [`Error::Overflow`] if the value exceeds 53 bits
///
/// # Example
/// ```
/// use flake53::{Flake, parse_radix};
///
/// let id = parse_radix("FF", 16).unwrap();
/// assert_eq!(id.to_raw(), 255);
/// ```
pub fn parse_radix(text: &str, radix: u32) -> Result<Flake> {
    check_radix(radix)?;
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut acc = 0_u64;
    for (index, byte) in text.bytes().enumerate() {
        let digit = LOOKUP[byte as usize];
        if digit == NO_VALUE || u32::from(digit) >= radix {
            return Err(Error::InvalidDigit { byte, index, radix });
        }
        acc = acc
            .checked_mul(u64::from(radix))
            .and_then(|acc| acc.checked_add(u64::from(digit)))
            .filter(|&acc| acc <= Flake::MAX_RAW)
            .ok_or(Error::Overflow)?;
    }

    Ok(Flake::from_raw(acc))
}

/// Permissive variant of [`parse_radix`]: any error maps to the zero
/// identifier.
///
/// Provided for callers that want the silent-failure contract; new code
/// should prefer the fallible form.
pub fn parse_radix_lossy(text: &str, radix: u32) -> Flake {
    parse_radix(text, radix).unwrap_or(Flake::from_raw(0))
}
