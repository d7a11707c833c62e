//! Token stream shared by the rewrite passes.

/// Markup inserted by a rewrite pass.
///
/// Tags are written only by the serializer, never parsed back out of
/// text, so literal `<` in a message can not be mistaken for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    BoldOpen,
    BoldClose,
    /// Opening anchor up to the start of the href value.
    LinkHrefStart,
    /// End of the href value and the rest of the opening anchor.
    LinkHrefEnd,
    LinkClose,
    LineBreak,
}

/// Single unit of a message being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Literal character from the original message.
    Text(char),
    /// Markup produced by an earlier pass.
    Tag(Tag),
}

impl Token {
    /// Returns true when token is the literal character `c`.
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Token::Text(t) if *t == c)
    }

    /// Returns true for characters that end a line.
    ///
    /// Bold spans never cross these. Matches the set of line terminators
    /// recognized by browser regular expressions.
    pub fn is_line_terminator(&self) -> bool {
        matches!(
            self,
            Token::Text('\n' | '\r' | '\u{2028}' | '\u{2029}') | Token::Tag(Tag::LineBreak)
        )
    }
}

/// Splits raw message text into literal tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.chars().map(Token::Text).collect()
}

/// Finds first index at or after `from` holding literal `c`.
pub(crate) fn find_char(tokens: &[Token], from: usize, c: char) -> Option<usize> {
    tokens
        .get(from..)?
        .iter()
        .position(|t| t.is_char(c))
        .map(|p| from + p)
}

/// Finds first index at or after `from` starting two consecutive `c`.
pub(crate) fn find_pair(tokens: &[Token], from: usize, c: char) -> Option<usize> {
    tokens
        .get(from..)?
        .windows(2)
        .position(|w| w[0].is_char(c) && w[1].is_char(c))
        .map(|p| from + p)
}
