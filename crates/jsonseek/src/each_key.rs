//! Answering many paths in one forward pass.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::Error;
use crate::get::value_at;
use crate::path::index_segment;
use crate::scan::{block_end, next_token, string_end};
use crate::search::search_keys;
use crate::unescape::{unescape_into, Scratch};
use crate::value::RawValue;

/// Upper bound on the number of paths a single [`each_key`] call accepts;
/// each path occupies one bit of a `u64` flag word.
pub const MAX_PATHS: usize = 63;

/// Resolves up to [`MAX_PATHS`] paths in a single scan of `data`,
/// invoking `visitor` with the path's position in `paths` and the value,
/// in the document order of the matches. Returns the number of paths
/// resolved and the offset where the scan stopped.
///
/// The scan keeps a buffer of the key names discovered along the current
/// nesting chain; a key resolves every pending path whose length matches
/// its depth, whose earlier segments equal the discovered chain, and whose
/// last segment equals the key. As with single-path lookup, the first
/// candidate along the scan consumes a path (repeated keys do not
/// re-resolve it) and the scan stops early once every path is consumed,
/// which is the point of this entry over repeated [`get`](crate::get)
/// calls.
///
/// Index segments are honored: entering an array, the still-pending paths
/// expecting an element of it are dispatched per element, their remaining
/// suffixes resolved inside the element's region.
///
/// Errors from classifying a matched value, like errors returned by the
/// visitor, stop the scan and propagate.
///
/// # Panics
///
/// If `paths` holds more than [`MAX_PATHS`] entries. The limit is a
/// contract of the API, not a property of the document.
pub fn each_key<'a, F>(
    data: &'a [u8],
    paths: &[&[&str]],
    mut visitor: F,
) -> Result<(usize, usize), Error>
where
    F: FnMut(usize, RawValue<'a>) -> Result<(), Error>,
{
    assert!(
        paths.len() <= MAX_PATHS,
        "each_key supports at most {MAX_PATHS} paths"
    );
    let all: u64 = (1 << paths.len()) - 1;
    let max_depth = paths.iter().map(|p| p.len()).max().unwrap_or(0);

    let mut consumed: u64 = 0;
    let mut resolved = 0usize;
    let mut chain: Vec<Cow<'a, [u8]>> = vec![Cow::Borrowed(&[][..]); max_depth];
    let mut scratch = Scratch::new();
    let mut depth: isize = 0;
    let mut i = 0usize;

    if all == 0 {
        return Ok((0, 0));
    }

    while i < data.len() {
        match data[i] {
            b'"' => {
                i += 1;
                let key_begin = i;
                let (str_end, escaped) = string_end(&data[i..]).ok_or(Error::MalformedString)?;
                i += str_end;
                let key_end = i - 1;

                i += next_token(&data[i..]).ok_or(Error::MalformedJson)?;

                if data[i] == b':' && depth >= 1 && depth as usize <= max_depth {
                    let d = depth as usize;
                    let key: Cow<'a, [u8]> = if escaped {
                        unescape_into(&data[key_begin..key_end], &mut scratch)?;
                        Cow::Owned(scratch.to_vec())
                    } else {
                        Cow::Borrowed(&data[key_begin..key_end])
                    };
                    // `deeper` means some pending path continues past this
                    // key, so the scan has to descend into the value even
                    // when the key also resolved a shorter path
                    let mut deeper = false;
                    let mut value = None;
                    for (pi, p) in paths.iter().enumerate() {
                        if consumed & (1 << pi) != 0
                            || p.len() < d
                            || p[d - 1].as_bytes() != key.as_ref()
                            || !chain_matches(&p[..d - 1], &chain[..d - 1])
                        {
                            continue;
                        }
                        if p.len() > d {
                            deeper = true;
                            continue;
                        }
                        let v = match value {
                            Some(v) => v,
                            None => {
                                let v = value_at(&data[i + 1..])?.rebase(i + 1);
                                value = Some(v);
                                v
                            }
                        };
                        visitor(pi, v)?;
                        consumed |= 1 << pi;
                        resolved += 1;
                    }
                    chain[d - 1] = key;
                    // consumed == all implies the last consumption happened
                    // here, with no path left to keep descending for
                    match value {
                        Some(v) if !deeper => {
                            // the value was consumed; pick the scan up after it
                            i = v.end;
                            if consumed == all {
                                return Ok((resolved, i));
                            }
                            continue;
                        }
                        None if !deeper => {
                            // no pending path runs through this key; skip an
                            // object value opaquely instead of descending
                            let start =
                                i + 1 + next_token(&data[i + 1..]).ok_or(Error::MalformedJson)?;
                            if data[start] == b'{' {
                                let skip = block_end(&data[start..], b'{', b'}')
                                    .ok_or(Error::MalformedObject)?;
                                i = start + skip;
                                continue;
                            }
                        }
                        // descend for the longer paths
                        _ => {}
                    }
                } else {
                    // a string value; reprocess the byte under the cursor
                    i -= 1;
                }
            }
            b'{' => depth += 1,
            b'}' => depth -= 1,
            b'[' => {
                let d = depth.max(0) as usize;
                let pending: Vec<(usize, usize)> = paths
                    .iter()
                    .enumerate()
                    .filter(|(pi, p)| {
                        consumed & (1 << pi) == 0
                            && p.len() > d
                            && chain_matches(&p[..d], &chain[..d.min(chain.len())])
                    })
                    .filter_map(|(pi, p)| index_segment(p[d]).map(|idx| (pi, idx)))
                    .collect();

                if pending.is_empty() {
                    let skip = block_end(&data[i..], b'[', b']').ok_or(Error::MalformedArray)?;
                    i += skip;
                    continue;
                }

                let (done, end) = each_index(data, i, d, &pending, paths, &mut visitor)?;
                for (pi, sub_resolved) in done {
                    consumed |= 1 << pi;
                    if sub_resolved {
                        resolved += 1;
                    }
                }
                i = end;
                if consumed == all {
                    return Ok((resolved, i));
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    Ok((resolved, i))
}

/// Walks the array opening at `data[open]`, dispatching each `(path,
/// index)` pair in `pending` against the element it addresses. Every pair
/// is consumed by this array, whether its element existed or not; the
/// returned flags say which ones actually resolved. Returns those pairs
/// and the offset just past the array.
fn each_index<'a, F>(
    data: &'a [u8],
    open: usize,
    depth: usize,
    pending: &[(usize, usize)],
    paths: &[&[&str]],
    visitor: &mut F,
) -> Result<(Vec<(usize, bool)>, usize), Error>
where
    F: FnMut(usize, RawValue<'a>) -> Result<(), Error>,
{
    let mut done = Vec::new();
    let mut off = open + 1;
    let mut index = 0usize;
    loop {
        off += next_token(&data[off..]).ok_or(Error::MalformedArray)?;
        if data[off] == b']' {
            // the array closed before these indices; the paths are
            // consumed without a result, exactly as a suffix miss is
            for &(pi, want) in pending {
                if want >= index {
                    done.push((pi, false));
                }
            }
            return Ok((done, off + 1));
        }
        let value = value_at(&data[off..])?.rebase(off);
        for &(pi, want) in pending {
            if want != index {
                continue;
            }
            let suffix = &paths[pi][depth + 1..];
            if suffix.is_empty() {
                visitor(pi, value)?;
                done.push((pi, true));
                continue;
            }
            let region = &data[off..value.end];
            match search_keys(region, suffix) {
                Some(sub) => {
                    let v = value_at(&region[sub..])?.rebase(off + sub);
                    visitor(pi, v)?;
                    done.push((pi, true));
                }
                // the element exists but the suffix does not resolve; the
                // path is consumed without a result
                None => done.push((pi, false)),
            }
        }

        off = value.end;
        off += next_token(&data[off..]).ok_or(Error::MalformedArray)?;
        match data[off] {
            b']' => {
                // element `index` was the last one; indices past it are
                // consumed without a result
                for &(pi, want) in pending {
                    if want > index {
                        done.push((pi, false));
                    }
                }
                return Ok((done, off + 1));
            }
            b',' => off += 1,
            _ => return Err(Error::MalformedArray),
        }
        index += 1;
    }
}

fn chain_matches(segments: &[&str], chain: &[Cow<'_, [u8]>]) -> bool {
    segments.len() == chain.len()
        && segments
            .iter()
            .zip(chain)
            .all(|(s, c)| s.as_bytes() == c.as_ref())
}
