use serde::Serialize;

/// A 1-based line and column position within a markup document.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineCol {
    line: u32,
    column: u32,
}

impl LineCol {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Default for LineCol {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: u32,
    length: u32,
}

impl Span {
    #[must_use]
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub fn from_parts(start: usize, length: usize) -> Self {
        let start_u32 = u32::try_from(start).unwrap_or(u32::MAX);
        let length_u32 = u32::try_from(length).unwrap_or(u32::MAX.saturating_sub(start_u32));
        Span::new(start_u32, length_u32)
    }

    /// Construct a span from integer bounds expressed as byte offsets.
    #[must_use]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self::from_parts(start, end.saturating_sub(start))
    }

    #[must_use]
    pub fn start(self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn start_usize(self) -> usize {
        self.start as usize
    }

    #[must_use]
    pub fn end(self) -> u32 {
        self.start.saturating_add(self.length)
    }

    #[must_use]
    pub fn length(self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn length_usize(self) -> usize {
        self.length as usize
    }
}

/// Byte offsets of every line start in a document.
///
/// Only `\n` terminates a line, so a `\r\n` pair counts as a single break
/// and the `\r` stays part of the line it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(u32::try_from(idx + 1).unwrap_or(u32::MAX));
            }
        }
        Self {
            starts,
            len: u32::try_from(source.len()).unwrap_or(u32::MAX),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte offset of the start of a 1-based line, if the line exists.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<usize> {
        let idx = usize::try_from(line).ok()?.checked_sub(1)?;
        self.starts.get(idx).map(|start| *start as usize)
    }

    /// Resolve a line/column position back to a byte offset in `source`.
    ///
    /// Columns past the end of the line clamp to the line's end.
    #[must_use]
    pub fn offset(&self, source: &str, position: LineCol) -> Option<usize> {
        let start = self.line_start(position.line())?;
        let line = source[start..].split('\n').next().unwrap_or_default();
        let skip = position.column().saturating_sub(1) as usize;
        let within = line
            .char_indices()
            .nth(skip)
            .map_or(line.len(), |(idx, _)| idx);
        Some(start + within)
    }

    /// Convert a byte offset into a 1-based line/column position.
    #[must_use]
    pub fn line_col(&self, source: &str, offset: usize) -> LineCol {
        let offset = offset.min(self.len as usize);
        let line_idx = match self
            .starts
            .binary_search(&u32::try_from(offset).unwrap_or(u32::MAX))
        {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.starts[line_idx] as usize;
        let column = source
            .get(line_start..offset)
            .map_or(0, |text| text.chars().count());
        LineCol::new(
            u32::try_from(line_idx + 1).unwrap_or(u32::MAX),
            u32::try_from(column + 1).unwrap_or(u32::MAX),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_starts_follow_newlines() {
        let index = LineIndex::new("a\nbc\r\nd");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(1), Some(0));
        assert_eq!(index.line_start(2), Some(2));
        assert_eq!(index.line_start(3), Some(6));
        assert_eq!(index.line_start(4), None);
        assert_eq!(index.line_start(0), None);
    }

    #[test]
    fn offset_and_line_col_agree() {
        let source = "<VStack>\n  <Button>OK</Butto>\n</VStack>";
        let index = LineIndex::new(source);
        let offset = source.find("</Butto>").unwrap();
        let position = index.line_col(source, offset);
        assert_eq!(position, LineCol::new(2, 13));
        assert_eq!(index.offset(source, position), Some(offset));
    }

    #[test]
    fn columns_count_characters() {
        let source = "héllo <Text>";
        let index = LineIndex::new(source);
        let offset = source.find('<').unwrap();
        assert_eq!(index.line_col(source, offset), LineCol::new(1, 7));
    }

    #[test]
    fn offset_clamps_to_line_end() {
        let source = "ab\ncd";
        let index = LineIndex::new(source);
        assert_eq!(index.offset(source, LineCol::new(1, 40)), Some(2));
    }
}
