//! Typed accessors: thin adaptors coercing extracted regions.
//!
//! Each helper runs [`get`] and then interprets the returned bytes. None
//! of them touch the document beyond the addressed value, and a kind
//! mismatch is reported as [`Error::TypeMismatch`] rather than coerced.

use alloc::string::String;

use crate::error::Error;
use crate::get::get;
use crate::unescape::unescape;
use crate::value::{RawValue, ValueKind};

fn get_kind<'a>(data: &'a [u8], path: &[&str], expected: ValueKind) -> Result<RawValue<'a>, Error> {
    let value = get(data, path)?;
    if value.kind != expected {
        return Err(Error::TypeMismatch {
            expected,
            actual: value.kind,
        });
    }
    Ok(value)
}

/// Resolves `path` to a boolean.
pub fn get_bool(data: &[u8], path: &[&str]) -> Result<bool, Error> {
    parse_bool(get_kind(data, path, ValueKind::Boolean)?.raw)
}

/// Resolves `path` to a signed integer. Fractional or exponent forms, and
/// magnitudes outside `i64`, are [`Error::MalformedValue`].
pub fn get_int(data: &[u8], path: &[&str]) -> Result<i64, Error> {
    parse_int(get_kind(data, path, ValueKind::Number)?.raw)
}

/// Resolves `path` to a float.
pub fn get_float(data: &[u8], path: &[&str]) -> Result<f64, Error> {
    parse_float(get_kind(data, path, ValueKind::Number)?.raw)
}

/// Resolves `path` to an owned string, decoding escape sequences.
pub fn get_string(data: &[u8], path: &[&str]) -> Result<String, Error> {
    let raw = get_kind(data, path, ValueKind::String)?.raw;
    // common case: nothing to decode
    if !raw.contains(&b'\\') {
        return String::from_utf8(raw.to_vec()).map_err(|_| Error::MalformedValue);
    }
    String::from_utf8(unescape(raw)?).map_err(|_| Error::MalformedValue)
}

/// Resolves `path` to a borrowed `&str` of the raw string region, escape
/// sequences left intact. This is the zero-copy read; use
/// [`get_string`] when the text must be decoded.
pub fn get_str<'a>(data: &'a [u8], path: &[&str]) -> Result<&'a str, Error> {
    let raw = get_kind(data, path, ValueKind::String)?.raw;
    core::str::from_utf8(raw).map_err(|_| Error::MalformedValue)
}

/// Interprets a [`ValueKind::Boolean`] region.
pub fn parse_bool(raw: &[u8]) -> Result<bool, Error> {
    match raw {
        b"true" => Ok(true),
        b"false" => Ok(false),
        _ => Err(Error::MalformedValue),
    }
}

/// Interprets a [`ValueKind::Number`] region as a decimal integer with
/// optional leading `-`, detecting overflow.
pub fn parse_int(raw: &[u8]) -> Result<i64, Error> {
    let (neg, digits) = match raw.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, raw),
    };
    if digits.is_empty() {
        return Err(Error::MalformedValue);
    }
    // accumulate negative: i64::MIN has no positive counterpart
    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(Error::MalformedValue);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_sub(i64::from(b - b'0')))
            .ok_or(Error::MalformedValue)?;
    }
    if neg {
        Ok(value)
    } else {
        value.checked_neg().ok_or(Error::MalformedValue)
    }
}

/// Interprets a [`ValueKind::Number`] region as an IEEE-754 double. The
/// underlying parser is more permissive than the JSON grammar (a leading
/// `+` is tolerated, for instance); the scanner does not re-validate.
pub fn parse_float(raw: &[u8]) -> Result<f64, Error> {
    core::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(Error::MalformedValue)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    const DOC: &[u8] = br#"{"b":true,"n":-12,"f":1.25e2,"s":"a\nb","plain":"ok","nested":{"x":false}}"#;

    #[test]
    fn typed_lookups() {
        assert_eq!(get_bool(DOC, &["b"]), Ok(true));
        assert_eq!(get_bool(DOC, &["nested", "x"]), Ok(false));
        assert_eq!(get_int(DOC, &["n"]), Ok(-12));
        assert_eq!(get_float(DOC, &["f"]), Ok(125.0));
        assert_eq!(get_string(DOC, &["s"]).unwrap(), "a\nb");
        assert_eq!(get_string(DOC, &["plain"]).unwrap(), "ok");
        assert_eq!(get_str(DOC, &["s"]), Ok(r"a\nb"));
    }

    #[test]
    fn kind_mismatches() {
        assert_eq!(
            get_bool(DOC, &["n"]),
            Err(Error::TypeMismatch {
                expected: ValueKind::Boolean,
                actual: ValueKind::Number,
            })
        );
        assert_eq!(
            get_int(DOC, &["s"]),
            Err(Error::TypeMismatch {
                expected: ValueKind::Number,
                actual: ValueKind::String,
            })
        );
        assert!(matches!(
            get_string(DOC, &["nested"]),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn absence_is_not_a_mismatch() {
        assert_eq!(get_int(DOC, &["missing"]), Err(Error::KeyPathNotFound));
    }

    #[test]
    fn parse_int_detects_overflow() {
        assert_eq!(parse_int(b"9223372036854775807"), Ok(i64::MAX));
        assert_eq!(parse_int(b"-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(
            parse_int(b"9223372036854775808"),
            Err(Error::MalformedValue)
        );
        assert_eq!(
            parse_int(b"-9223372036854775809"),
            Err(Error::MalformedValue)
        );
        assert_eq!(
            parse_int(b"92233720368547758070"),
            Err(Error::MalformedValue)
        );
    }

    #[test]
    fn parse_int_rejects_non_integers() {
        assert_eq!(parse_int(b""), Err(Error::MalformedValue));
        assert_eq!(parse_int(b"-"), Err(Error::MalformedValue));
        assert_eq!(parse_int(b"1.5"), Err(Error::MalformedValue));
        assert_eq!(parse_int(b"1e3"), Err(Error::MalformedValue));
    }

    #[test]
    fn parse_float_accepts_json_numbers() {
        assert_eq!(parse_float(b"0"), Ok(0.0));
        assert_eq!(parse_float(b"-2.5"), Ok(-2.5));
        assert_eq!(parse_float(b"1e-3"), Ok(0.001));
        assert_eq!(parse_float(b"abc"), Err(Error::MalformedValue));
        // tolerated beyond the JSON grammar
        assert_eq!(parse_float(b"+3.5"), Ok(3.5));
    }

    #[test]
    fn parse_bool_requires_exact_literals() {
        assert_eq!(parse_bool(b"true"), Ok(true));
        assert_eq!(parse_bool(b"false"), Ok(false));
        assert_eq!(parse_bool(b"True"), Err(Error::MalformedValue));
        assert_eq!(parse_bool(b""), Err(Error::MalformedValue));
    }

    #[test]
    fn get_string_decodes_unicode_escapes() {
        let doc = b"{\"k\":\"\\uD83D\\uDE00!\"}";
        assert_eq!(get_string(doc, &["k"]).unwrap(), "😀!".to_string());
    }
}
