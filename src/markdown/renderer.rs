//! Inline renderer: pass pipeline plus serialization.

use maud::Render;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::passes::{Pass, STANDARD_PASSES};
use super::token::{Tag, Token, tokenize};

const LINK_HREF_END: &str =
    "\" target=\"_blank\" style=\"color: #007bff; text-decoration: underline;\">";
const LINK_HREF_END_ESCAPED: &str = "\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"color: #007bff; text-decoration: underline;\">";

/// Schemes refused as link targets in escaped mode.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// How literal message text is written into the fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Literal text is copied verbatim, so `<`, `>`, `&` and quotes in a
    /// message become live markup.
    #[default]
    Raw,
    /// Literal text is HTML escaped and link targets with script capable
    /// schemes are neutralized.
    Escaped,
}

/// Renders chat message text into an HTML fragment.
///
/// Applies bold, link, and line break rewrites in that order, each on the
/// output of the previous one. Rendering is total: every input produces a
/// fragment and unmatched delimiters stay literal.
///
/// Must be applied once per raw message. Rendering already rendered output
/// is not idempotent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineRenderer {
    mode: RenderMode,
}

impl InlineRenderer {
    /// Creates renderer that copies literal text verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates renderer with explicit mode.
    pub fn with_mode(mode: RenderMode) -> Self {
        Self { mode }
    }

    /// Renders message text to an HTML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatlet::InlineRenderer;
    ///
    /// let html = InlineRenderer::new().render("**hi**\nthere");
    /// assert_eq!(html, "<b>hi</b><br>there");
    /// ```
    pub fn render(&self, text: &str) -> String {
        let tokens = STANDARD_PASSES
            .iter()
            .fold(tokenize(text), |tokens, pass: &Pass| {
                trace!(pass = pass.name(), tokens = tokens.len(), "applying rewrite pass");
                pass.apply(tokens)
            });

        self.serialize(&tokens)
    }

    /// Renders message text as a fragment usable inside maud templates.
    pub fn fragment(&self, text: &str) -> Fragment {
        Fragment(self.render(text))
    }

    fn serialize(&self, tokens: &[Token]) -> String {
        let mut out = String::with_capacity(tokens.len() + 16);
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            match token {
                Token::Text(c) => self.push_text(&mut out, *c),
                Token::Tag(Tag::LinkHrefStart) if self.mode == RenderMode::Escaped => {
                    // Only literal target text reaches the attribute
                    let mut href = String::new();
                    for inner in iter.by_ref() {
                        match inner {
                            Token::Tag(Tag::LinkHrefEnd) => break,
                            Token::Text(c) => href.push(*c),
                            Token::Tag(_) => {}
                        }
                    }

                    out.push_str(Self::tag_markup(Tag::LinkHrefStart, self.mode));
                    for c in sanitize_href(&href).chars() {
                        escape_char(&mut out, c);
                    }
                    out.push_str(Self::tag_markup(Tag::LinkHrefEnd, self.mode));
                }
                Token::Tag(tag) => out.push_str(Self::tag_markup(*tag, self.mode)),
            }
        }

        out
    }

    fn push_text(&self, out: &mut String, c: char) {
        match self.mode {
            RenderMode::Raw => out.push(c),
            RenderMode::Escaped => escape_char(out, c),
        }
    }

    fn tag_markup(tag: Tag, mode: RenderMode) -> &'static str {
        match (tag, mode) {
            (Tag::BoldOpen, _) => "<b>",
            (Tag::BoldClose, _) => "</b>",
            (Tag::LinkHrefStart, _) => "<a href=\"",
            (Tag::LinkHrefEnd, RenderMode::Raw) => LINK_HREF_END,
            (Tag::LinkHrefEnd, RenderMode::Escaped) => LINK_HREF_END_ESCAPED,
            (Tag::LinkClose, _) => "</a>",
            (Tag::LineBreak, _) => "<br>",
        }
    }
}

/// Renders message text with the default raw renderer.
///
/// # Examples
///
/// ```
/// assert_eq!(chatlet::render("a\nb"), "a<br>b");
/// ```
pub fn render(text: &str) -> String {
    InlineRenderer::new().render(text)
}

/// HTML produced from one message.
///
/// Derived from the message text on every render, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Render for Fragment {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0);
    }
}

fn escape_char(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}

/// Replaces script capable link targets with `#`.
///
/// Browsers ignore whitespace and control characters inside a scheme,
/// so those are dropped before comparing.
fn sanitize_href(href: &str) -> &str {
    let normalized: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();

    if BLOCKED_SCHEMES.iter().any(|s| normalized.starts_with(s)) {
        "#"
    } else {
        href
    }
}
