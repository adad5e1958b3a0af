//! Path resolution: a single forward pass that never materializes anything.

use crate::get::value_at;
use crate::path::index_segment;
use crate::scan::{block_end, next_token, string_end};
use crate::unescape::{unescape_into, Scratch};

/// Advances to the value addressed by `path` and returns the absolute
/// offset of the byte just past the `:` introducing it (or, for a path
/// ending in an index segment, the offset of the element itself). `None`
/// when the path cannot be resolved. An empty path resolves to offset 0.
///
/// Two counters drive the walk: `object_depth` counts `{`/`}` nesting and
/// `matched_depth` counts consumed path segments. A key is only compared
/// when it sits exactly one object deeper than the segments matched so
/// far; everything else is skipped opaquely: string values, keys of
/// unrelated subtrees, whole arrays not addressed by an index segment.
/// The first matching key along the scan wins a segment; closing the brace
/// of a matched scope gives the segment back.
pub(crate) fn search_keys(data: &[u8], path: &[&str]) -> Option<usize> {
    if path.is_empty() {
        return Some(0);
    }

    let mut i = 0usize;
    let mut object_depth: isize = 0;
    let mut matched_depth: isize = 0;
    let mut scratch = Scratch::new();

    while i < data.len() {
        match data[i] {
            b'"' => {
                i += 1;
                let key_begin = i;
                let (str_end, escaped) = string_end(&data[i..])?;
                i += str_end;
                let key_end = i - 1;

                i += next_token(&data[i..])?;

                if data[i] == b':' && object_depth >= 1 && matched_depth + 1 == object_depth {
                    let key = &data[key_begin..key_end];
                    let wanted = path[matched_depth as usize].as_bytes();
                    let matches = if escaped {
                        unescape_into(key, &mut scratch).ok()?;
                        scratch.as_slice() == wanted
                    } else {
                        key == wanted
                    };
                    if matches {
                        matched_depth += 1;
                        if matched_depth as usize == path.len() {
                            return Some(i + 1);
                        }
                    }
                } else {
                    // a string value (or a key out of reach); reprocess the
                    // byte under the cursor as a structural token
                    i -= 1;
                }
            }
            b'{' => object_depth += 1,
            b'}' => {
                object_depth -= 1;
                // the scope of the last matched segment closed; give the
                // segment back
                if object_depth == matched_depth {
                    matched_depth -= 1;
                }
            }
            b'[' => {
                let target = if matched_depth >= 0 && matched_depth == object_depth {
                    index_segment(path[matched_depth as usize])
                } else {
                    None
                };
                match target {
                    Some(target) => {
                        return descend_index(data, i, target, &path[matched_depth as usize + 1..])
                    }
                    None => {
                        // keys inside arrays can never match; skip the region
                        let skip = block_end(&data[i..], b'[', b']')?;
                        i += skip - 1;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Walks the array opening at `data[open]`, counting elements up to
/// `target`, then resolves `suffix` inside that element's region and
/// rebases the result. `None` when the array holds fewer than `target + 1`
/// elements or is malformed along the way.
fn descend_index(data: &[u8], open: usize, target: usize, suffix: &[&str]) -> Option<usize> {
    let mut off = open + 1;
    let mut index = 0usize;
    loop {
        off += next_token(&data[off..])?;
        if data[off] == b']' {
            return None;
        }
        let value = value_at(&data[off..]).ok()?;
        if index == target {
            let region = &data[off..off + value.end];
            return search_keys(region, suffix).map(|sub| off + sub);
        }
        off += value.end;
        off += next_token(&data[off..])?;
        if data[off] != b',' {
            return None;
        }
        off += 1;
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_resolves_to_the_start() {
        assert_eq!(search_keys(b"  {\"a\":1}", &[]), Some(0));
    }

    #[test]
    fn top_level_key() {
        let doc = br#"{"a":1,"b":2}"#;
        assert_eq!(search_keys(doc, &["a"]), Some(5));
        assert_eq!(search_keys(doc, &["b"]), Some(11));
        assert_eq!(search_keys(doc, &["c"]), None);
    }

    #[test]
    fn nested_keys_require_matching_depth() {
        // the inner "a" must not satisfy a top-level lookup for "b"
        let doc = br#"{"a":{"a":"1"},"b":2}"#;
        let off = search_keys(doc, &["b"]).unwrap();
        assert_eq!(&doc[off..off + 1], b"2");
    }

    #[test]
    fn closing_brace_resets_the_matched_segment() {
        // "a" matches, its scope closes without "b", and the later "x.b"
        // must not be taken for "a.b"
        let doc = br#"{"a":{"c":1},"x":{"b":2}}"#;
        assert_eq!(search_keys(doc, &["a", "b"]), None);

        let doc = br#"{"a":{"c":1},"a":{"b":2}}"#;
        let off = search_keys(doc, &["a", "b"]).unwrap();
        assert_eq!(&doc[off..off + 1], b"2");
    }

    #[test]
    fn keys_inside_arrays_are_never_matched() {
        let doc = br#"{"a":[{"b":1}],"b":2}"#;
        let off = search_keys(doc, &["b"]).unwrap();
        assert_eq!(&doc[off..off + 1], b"2");
    }

    #[test]
    fn first_match_wins_for_repeated_keys() {
        let doc = br#"{"a":{"k":1},"a":{"k":2}}"#;
        let off = search_keys(doc, &["a", "k"]).unwrap();
        assert_eq!(&doc[off..off + 1], b"1");
    }

    #[test]
    fn escaped_keys_compare_decoded() {
        let doc = b"{\"a\\u00B0b\":1}";
        let off = search_keys(doc, &["a°b"]).unwrap();
        assert_eq!(&doc[off..off + 1], b"1");
        // and the escaped form is not matched verbatim
        assert_eq!(search_keys(doc, &["a\\u00B0b"]), None);
    }

    #[test]
    fn index_segments_descend_into_arrays() {
        let doc = br#"{"a":[{"b":1},{"b":2},3]}"#;
        let off = search_keys(doc, &["a", "[1]", "b"]).unwrap();
        assert_eq!(&doc[off..off + 1], b"2");

        let off = search_keys(doc, &["a", "[2]"]).unwrap();
        assert_eq!(&doc[off..off + 1], b"3");
    }

    #[test]
    fn short_arrays_do_not_resolve() {
        let doc = br#"{"a":[1,2]}"#;
        assert_eq!(search_keys(doc, &["a", "[2]"]), None);
        assert_eq!(search_keys(doc, &["a", "[10]", "b"]), None);
    }

    #[test]
    fn top_level_index_segment() {
        let doc = br#"[{"k":"x"},{"k":"y"}]"#;
        let off = search_keys(doc, &["[1]", "k"]).unwrap();
        assert_eq!(&doc[off..off + 3], b"\"y\"");
    }

    #[test]
    fn bracketed_non_index_segments_are_literal_keys() {
        let doc = br#"{"[1]":7,"a":[5,6]}"#;
        let off = search_keys(doc, &["[1]"]);
        // "[1]" addresses index 1 of an array, never the literal key
        assert_eq!(off, None);
        let off = search_keys(doc, &["[1a]"]);
        assert_eq!(off, None);
    }

    #[test]
    fn stray_closers_do_not_panic() {
        assert_eq!(search_keys(b"}}}", &["a"]), None);
        assert_eq!(search_keys(b"}{\"a\":1}", &["a"]), None);
    }

    #[test]
    fn unterminated_key_string() {
        assert_eq!(search_keys(b"{\"a", &["a"]), None);
    }
}
