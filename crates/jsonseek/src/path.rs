//! Path-segment interpretation.
//!
//! A path is an ordered sequence of `&str` segments. A segment of the exact
//! form `[N]` (opening bracket, one or more ASCII digits, closing bracket)
//! selects the N-th element of an array, zero-based. Any other segment is a
//! literal object key, so `[1a]`, `[]` and `[-1]` all address keys named
//! with those bytes rather than array elements.

/// Returns the array index selected by `segment`, or `None` when the
/// segment is a literal key.
pub(crate) fn index_segment(segment: &str) -> Option<usize> {
    let inner = segment.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    inner.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_forms_are_indices() {
        assert_eq!(index_segment("[0]"), Some(0));
        assert_eq!(index_segment("[42]"), Some(42));
        assert_eq!(index_segment("[007]"), Some(7));
    }

    #[test]
    fn everything_else_is_a_literal_key() {
        assert_eq!(index_segment("a"), None);
        assert_eq!(index_segment("[]"), None);
        assert_eq!(index_segment("[1a]"), None);
        assert_eq!(index_segment("[-1]"), None);
        assert_eq!(index_segment("[1"), None);
        assert_eq!(index_segment("1]"), None);
    }

    #[test]
    fn oversized_index_is_a_literal_key() {
        assert_eq!(index_segment("[99999999999999999999999999]"), None);
    }
}
