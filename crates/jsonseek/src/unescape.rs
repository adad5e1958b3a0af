//! String-escape decoding.
//!
//! The scanner compares keys lazily: a key whose raw bytes contain no
//! backslash is compared verbatim, and only escaped keys pass through this
//! decoder. Decoded bytes land in a [`Scratch`] buffer that stays on the
//! stack for keys up to [`SMALL_KEY_LEN`] decoded bytes and spills to the
//! heap beyond that.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use smallvec::SmallVec;

use crate::error::Error;

/// Decoded keys up to this many bytes never touch the heap.
pub(crate) const SMALL_KEY_LEN: usize = 64;

/// Stack-first buffer receiving decoded key bytes.
pub(crate) type Scratch = SmallVec<[u8; SMALL_KEY_LEN]>;

const HIGH_SURROGATES: RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Decodes the escape sequences in `data`, replacing the contents of `out`.
///
/// `data` is a raw string region as delimited by the scanner: everything
/// between (excluding) the quotes. Supported escapes are `\"`, `\\`, `\/`,
/// `\b`, `\f`, `\n`, `\r`, `\t` and `\uXXXX`, where a high surrogate must
/// be followed by a `\uXXXX` low surrogate and the pair decodes to a single
/// supplementary code point. Anything else is [`Error::MalformedStringEscape`].
pub(crate) fn unescape_into(data: &[u8], out: &mut Scratch) -> Result<(), Error> {
    out.clear();
    let mut i = 0;
    while i < data.len() {
        let c = data[i];
        if c != b'\\' {
            out.push(c);
            i += 1;
            continue;
        }
        let next = *data.get(i + 1).ok_or(Error::MalformedStringEscape)?;
        let simple = match next {
            b'"' => Some(b'"'),
            b'\\' => Some(b'\\'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'u' => None,
            _ => return Err(Error::MalformedStringEscape),
        };
        if let Some(b) = simple {
            out.push(b);
            i += 2;
        } else {
            let (ch, consumed) = decode_unicode_escape(&data[i..])?;
            let mut utf8 = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            i += consumed;
        }
    }
    Ok(())
}

/// Decodes the escape sequences in a raw string region, as returned for
/// [`ValueKind::String`](crate::ValueKind::String) values, into fresh bytes.
pub fn unescape(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Scratch::new();
    unescape_into(data, &mut out)?;
    Ok(out.into_vec())
}

/// Four ASCII hex digits to a code unit.
fn hex_quartet(data: &[u8]) -> Result<u32, Error> {
    if data.len() < 4 {
        return Err(Error::MalformedStringEscape);
    }
    let mut unit = 0u32;
    for &b in &data[..4] {
        let digit = (b as char)
            .to_digit(16)
            .ok_or(Error::MalformedStringEscape)?;
        unit = unit << 4 | digit;
    }
    Ok(unit)
}

/// `data` starts at the backslash of a `\uXXXX` escape. Returns the decoded
/// scalar and the bytes consumed: 6, or 12 for a surrogate pair.
fn decode_unicode_escape(data: &[u8]) -> Result<(char, usize), Error> {
    let hi = hex_quartet(data.get(2..).unwrap_or(&[]))?;
    if LOW_SURROGATES.contains(&hi) {
        return Err(Error::MalformedStringEscape);
    }
    if HIGH_SURROGATES.contains(&hi) {
        let rest = data.get(6..).unwrap_or(&[]);
        if rest.len() < 6 || rest[0] != b'\\' || rest[1] != b'u' {
            return Err(Error::MalformedStringEscape);
        }
        let lo = hex_quartet(&rest[2..])?;
        if !LOW_SURROGATES.contains(&lo) {
            return Err(Error::MalformedStringEscape);
        }
        let code = 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00);
        let ch = char::from_u32(code).ok_or(Error::MalformedStringEscape)?;
        return Ok((ch, 12));
    }
    // Everything outside the surrogate ranges is a valid scalar.
    let ch = char::from_u32(hi).ok_or(Error::MalformedStringEscape)?;
    Ok((ch, 6))
}
