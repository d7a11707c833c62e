//! Ordered rewrite passes over the token stream.

use super::token::{Tag, Token, find_char, find_pair};

/// One rewrite rule of the inline renderer.
///
/// Each pass consumes the output of the previous one. Matching is
/// leftmost-first and non-overlapping; unmatched delimiters stay literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// `**text**` to bold, shortest match, never across a line end.
    Bold,
    /// `[label](target)` to an anchor opened in a new browsing context.
    Link,
    /// `\n` to a line break element.
    LineBreak,
}

/// Bold, then link, then line break.
pub const STANDARD_PASSES: [Pass; 3] = [Pass::Bold, Pass::Link, Pass::LineBreak];

impl Pass {
    /// Short name used in trace output.
    pub fn name(self) -> &'static str {
        match self {
            Pass::Bold => "bold",
            Pass::Link => "link",
            Pass::LineBreak => "line-break",
        }
    }

    /// Applies pass to token stream.
    pub fn apply(self, tokens: Vec<Token>) -> Vec<Token> {
        match self {
            Pass::Bold => bold(&tokens),
            Pass::Link => link(&tokens),
            Pass::LineBreak => line_break(tokens),
        }
    }
}

fn bold(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut pos = 0;

    while pos < tokens.len() {
        let Some(open) = find_pair(tokens, pos, '*') else {
            break;
        };

        // No closing pair anywhere: no later opener can match either
        let Some(close) = find_pair(tokens, open + 2, '*') else {
            break;
        };

        // Shortest closing pair lies past a line end. Every opener before
        // that line end would pick the same closing pair, so resume after it.
        if let Some(offset) = tokens[open + 2..close]
            .iter()
            .position(Token::is_line_terminator)
        {
            let resume = open + 2 + offset + 1;
            out.extend_from_slice(&tokens[pos..resume]);
            pos = resume;
            continue;
        }

        out.extend_from_slice(&tokens[pos..open]);
        out.push(Token::Tag(Tag::BoldOpen));
        out.extend_from_slice(&tokens[open + 2..close]);
        out.push(Token::Tag(Tag::BoldClose));
        pos = close + 2;
    }

    out.extend_from_slice(&tokens[pos.min(tokens.len())..]);
    out
}

fn link(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() + 8);
    let mut pos = 0;

    while pos < tokens.len() {
        let Some(open) = find_char(tokens, pos, '[') else {
            break;
        };
        let Some(label_end) = find_char(tokens, open + 1, ']') else {
            break;
        };

        // Openers up to this bracket all end their label here too
        if !tokens.get(label_end + 1).is_some_and(|t| t.is_char('(')) {
            out.extend_from_slice(&tokens[pos..=label_end]);
            pos = label_end + 1;
            continue;
        }

        let target_start = label_end + 2;
        let Some(target_end) = find_char(tokens, target_start, ')') else {
            break;
        };

        out.extend_from_slice(&tokens[pos..open]);
        out.push(Token::Tag(Tag::LinkHrefStart));
        out.extend_from_slice(&tokens[target_start..target_end]);
        out.push(Token::Tag(Tag::LinkHrefEnd));
        out.extend_from_slice(&tokens[open + 1..label_end]);
        out.push(Token::Tag(Tag::LinkClose));
        pos = target_end + 1;
    }

    out.extend_from_slice(&tokens[pos.min(tokens.len())..]);
    out
}

fn line_break(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|t| {
            if t.is_char('\n') {
                Token::Tag(Tag::LineBreak)
            } else {
                t
            }
        })
        .collect()
}
