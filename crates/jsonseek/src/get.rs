//! Pointwise value extraction.

use crate::error::Error;
use crate::scan::{block_end, next_token, string_end, token_end};
use crate::search::search_keys;
use crate::value::{RawValue, ValueKind};

/// Classifies the nearest value in `data` and returns its kind, borrowed
/// region and end offset. Leading whitespace is skipped; the scanner reads
/// no further than the value's extent.
pub(crate) fn value_at(data: &[u8]) -> Result<RawValue<'_>, Error> {
    let start = next_token(data).ok_or(Error::MalformedJson)?;
    let rest = &data[start..];
    match rest[0] {
        b'"' => {
            let (end, _) = string_end(&rest[1..]).ok_or(Error::MalformedString)?;
            Ok(RawValue {
                kind: ValueKind::String,
                raw: &rest[1..end],
                end: start + 1 + end,
            })
        }
        b'[' => {
            let end = block_end(rest, b'[', b']').ok_or(Error::MalformedArray)?;
            Ok(RawValue {
                kind: ValueKind::Array,
                raw: &rest[..end],
                end: start + end,
            })
        }
        b'{' => {
            let end = block_end(rest, b'{', b'}').ok_or(Error::MalformedObject)?;
            Ok(RawValue {
                kind: ValueKind::Object,
                raw: &rest[..end],
                end: start + end,
            })
        }
        b't' | b'f' => {
            let end = token_end(rest);
            let raw = &rest[..end];
            if raw == b"true" || raw == b"false" {
                Ok(RawValue {
                    kind: ValueKind::Boolean,
                    raw,
                    end: start + end,
                })
            } else {
                Err(Error::UnknownValueType)
            }
        }
        b'n' | b'u' => {
            let end = token_end(rest);
            if &rest[..end] == b"null" {
                Ok(RawValue {
                    kind: ValueKind::Null,
                    raw: &rest[..0],
                    end: start + end,
                })
            } else {
                Err(Error::UnknownValueType)
            }
        }
        b'0'..=b'9' | b'-' => {
            let end = token_end(rest);
            Ok(RawValue {
                kind: ValueKind::Number,
                raw: &rest[..end],
                end: start + end,
            })
        }
        _ => Err(Error::UnknownValueType),
    }
}

/// Resolves `path` in `data` and returns the addressed value.
///
/// Path segments are literal keys, except the exact form `[N]` (ASCII
/// digits) which selects the N-th element of an array. An empty path
/// selects the nearest value, which is how streams and array elements are
/// read. On success the value's `end` is the absolute offset just past the
/// value, ready for resuming a scan.
///
/// An absent path is [`Error::KeyPathNotFound`]; every other error means
/// the document was malformed along the way to the answer. The scanner
/// stops as soon as its question is answered, so garbage after the
/// addressed value goes undetected.
///
/// ```
/// use jsonseek::{get, ValueKind};
///
/// let doc = br#"{"user":{"name":"amy","tags":["a","b"]}}"#;
/// let v = get(doc, &["user", "name"]).unwrap();
/// assert_eq!(v.kind, ValueKind::String);
/// assert_eq!(v.raw, b"amy");
///
/// let v = get(doc, &["user", "tags", "[1]"]).unwrap();
/// assert_eq!(v.raw, b"b");
/// ```
pub fn get<'a>(data: &'a [u8], path: &[&str]) -> Result<RawValue<'a>, Error> {
    let offset = if path.is_empty() {
        0
    } else {
        search_keys(data, path).ok_or(Error::KeyPathNotFound)?
    };
    Ok(value_at(&data[offset..])?.rebase(offset))
}
