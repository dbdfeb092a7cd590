use uiml_source::LineCol;

/// Cursor over markup source.
///
/// `line` and `column` always describe `position`: every primitive that moves
/// the cursor updates all three together. A `\r\n` pair is a single line
/// break; a lone `\r` is ordinary whitespace.
#[derive(Debug, Clone)]
pub struct ParseState<'s> {
    source: &'s str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'s> ParseState<'s> {
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    #[must_use]
    pub fn source(&self) -> &'s str {
        self.source
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn line_col(&self) -> LineCol {
        LineCol::new(self.line, self.column)
    }

    #[inline]
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[must_use]
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    #[inline]
    #[must_use]
    pub fn rest(&self) -> &'s str {
        &self.source[self.position..]
    }

    #[must_use]
    pub fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    #[must_use]
    pub fn slice(&self, start: usize) -> &'s str {
        &self.source[start..self.position]
    }

    /// Consume one logical character and return it. `\r\n` is consumed as a
    /// single `'\n'`.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();

        match ch {
            '\r' if self.peek() == Some('\n') => {
                self.position += 1;
                self.new_line();
                Some('\n')
            }
            '\n' => {
                self.new_line();
                Some('\n')
            }
            _ => {
                self.column += 1;
                Some(ch)
            }
        }
    }

    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Skip spaces, tabs and line breaks.
    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !matches!(ch, ' ' | '\t' | '\n' | '\r') {
                break;
            }
            self.advance();
        }
    }

    /// Consume characters while `predicate` holds and return them.
    pub fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'s str {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
        self.slice(start)
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_and_column() {
        let mut state = ParseState::new("ab\ncd");
        state.advance_n(2);
        assert_eq!(state.line_col(), LineCol::new(1, 3));
        state.advance();
        assert_eq!(state.line_col(), LineCol::new(2, 1));
        state.advance();
        assert_eq!(state.line_col(), LineCol::new(2, 2));
    }

    #[test]
    fn crlf_is_one_line_break() {
        let mut state = ParseState::new("a\r\nb");
        state.advance();
        assert_eq!(state.advance(), Some('\n'));
        assert_eq!(state.position(), 3);
        assert_eq!(state.line_col(), LineCol::new(2, 1));
    }

    #[test]
    fn lone_carriage_return_is_a_column() {
        let mut state = ParseState::new("a\rb");
        state.advance_n(2);
        assert_eq!(state.line_col(), LineCol::new(1, 3));
    }

    #[test]
    fn skip_whitespace_crosses_lines() {
        let mut state = ParseState::new("  \t\r\n\n  <Text>");
        state.skip_whitespace();
        assert_eq!(state.peek(), Some('<'));
        assert_eq!(state.line_col(), LineCol::new(3, 3));
    }

    #[test]
    fn multibyte_characters_count_once() {
        let mut state = ParseState::new("é<");
        state.advance();
        assert_eq!(state.peek(), Some('<'));
        assert_eq!(state.line_col(), LineCol::new(1, 2));
    }

    #[test]
    fn take_while_returns_consumed_text() {
        let mut state = ParseState::new("Button />");
        assert_eq!(state.take_while(char::is_alphanumeric), "Button");
        assert_eq!(state.peek(), Some(' '));
    }

    #[test]
    fn advance_at_end_is_none() {
        let mut state = ParseState::new("");
        assert!(state.is_at_end());
        assert_eq!(state.advance(), None);
        assert_eq!(state.line_col(), LineCol::new(1, 1));
    }
}
