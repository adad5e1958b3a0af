//! Byte offsets to line/column positions.
//!
//! Scanner entry points report positions as byte offsets. When one of
//! those offsets has to be shown to a person (a malformed-document report,
//! an editor jump), [`LineIndex`] maps it to a line and column, trading one
//! up-front pass over the buffer for O(log n) lookups afterwards.

use alloc::vec::Vec;

/// Newline positions of a buffer, recorded once so that byte offsets can
/// be mapped to line/column pairs by binary search.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    data: &'a [u8],
    newlines: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Scans `data` and records every `\n` position.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            newlines: data
                .iter()
                .enumerate()
                .filter_map(|(i, &b)| (b == b'\n').then_some(i))
                .collect(),
        }
    }

    /// Maps a byte offset to its zero-based line, byte column and
    /// character column. The character column counts UTF-8 scalars on the
    /// line, so it only differs from the byte column on non-ASCII lines.
    /// Offsets outside the buffer yield `None`.
    pub fn offset_to_line_col(&self, offset: usize) -> Option<(usize, usize, usize)> {
        if offset >= self.data.len() {
            return None;
        }
        let line = self.newlines.partition_point(|&pos| pos < offset);
        let line_start = match line {
            0 => 0,
            _ => self.newlines[line - 1] + 1,
        };
        let byte_col = offset - line_start;
        // count scalars between the line start and the offset; O(line length)
        let char_col = self.data[line_start..offset]
            .iter()
            .filter(|&&b| !(0x80..0xC0).contains(&b))
            .count();
        Some((line, byte_col, char_col))
    }
}
