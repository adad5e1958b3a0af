//! Container iteration built on the same scanner as pointwise lookup.

use crate::error::Error;
use crate::get::value_at;
use crate::scan::{next_token, string_end};
use crate::search::search_keys;
use crate::unescape::{unescape_into, Scratch};
use crate::value::RawValue;

/// Walks an array element by element, invoking `visitor` with each value
/// and the absolute offset of the value's first byte (the opening quote,
/// for strings), so the visitor can retain stable references into the
/// buffer. A non-empty `path` first descends to the array.
///
/// Empty arrays, in any whitespace flavor, terminate without the visitor
/// ever running. An error returned by the visitor stops the walk and is
/// handed back to the caller. On success the return value is the absolute
/// offset just past the array's closing `]`.
pub fn array_each<'a, F>(data: &'a [u8], path: &[&str], mut visitor: F) -> Result<usize, Error>
where
    F: FnMut(RawValue<'a>, usize) -> Result<(), Error>,
{
    let mut offset = if path.is_empty() {
        0
    } else {
        search_keys(data, path).ok_or(Error::KeyPathNotFound)?
    };
    offset += next_token(&data[offset..]).ok_or(Error::MalformedJson)?;
    if data[offset] != b'[' {
        return Err(Error::MalformedArray);
    }
    offset += 1;

    loop {
        let start = offset + next_token(&data[offset..]).ok_or(Error::MalformedArray)?;
        if data[start] == b']' {
            return Ok(start + 1);
        }
        let value = value_at(&data[start..])?.rebase(start);
        visitor(value, start)?;

        offset = value.end;
        offset += next_token(&data[offset..]).ok_or(Error::MalformedArray)?;
        match data[offset] {
            b']' => return Ok(offset + 1),
            b',' => offset += 1,
            _ => return Err(Error::MalformedArray),
        }
    }
}

/// Walks an object's members in document order, invoking `visitor` with
/// the decoded key bytes (valid only for the duration of the call), the
/// value, and the absolute offset of the value's first byte. A non-empty
/// `path` first descends to the object.
///
/// An error returned by the visitor aborts the walk and is handed back to
/// the caller.
pub fn object_each<'a, F>(data: &'a [u8], path: &[&str], mut visitor: F) -> Result<(), Error>
where
    F: FnMut(&[u8], RawValue<'a>, usize) -> Result<(), Error>,
{
    let mut offset = if path.is_empty() {
        0
    } else {
        search_keys(data, path).ok_or(Error::KeyPathNotFound)?
    };
    offset += next_token(&data[offset..]).ok_or(Error::MalformedObject)?;
    if data[offset] != b'{' {
        return Err(Error::MalformedObject);
    }
    offset += 1;

    let mut scratch = Scratch::new();
    loop {
        // the next token is a member's key, or the end of the object
        offset += next_token(&data[offset..]).ok_or(Error::MalformedObject)?;
        match data[offset] {
            b'}' => return Ok(()),
            b'"' => offset += 1,
            _ => return Err(Error::MalformedObject),
        }
        let key_begin = offset;
        let (str_end, escaped) = string_end(&data[offset..]).ok_or(Error::MalformedString)?;
        offset += str_end;
        let raw_key = &data[key_begin..offset - 1];

        offset += next_token(&data[offset..]).ok_or(Error::MalformedJson)?;
        if data[offset] != b':' {
            return Err(Error::MalformedJson);
        }
        offset += 1;

        let start = offset + next_token(&data[offset..]).ok_or(Error::MalformedJson)?;
        let value = value_at(&data[start..])?.rebase(start);
        if escaped {
            unescape_into(raw_key, &mut scratch)?;
            visitor(&scratch, value, start)?;
        } else {
            visitor(raw_key, value, start)?;
        }

        offset = value.end;
        offset += next_token(&data[offset..]).ok_or(Error::MalformedObject)?;
        match data[offset] {
            b'}' => return Ok(()),
            b',' => offset += 1,
            _ => return Err(Error::MalformedObject),
        }
    }
}
