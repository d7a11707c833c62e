//! Inline Markdown-subset rendering for chat messages.
//!
//! Supports exactly three constructs: `**bold**`, `[label](target)` links,
//! and hard line breaks. Text is tokenized once, rewritten by an ordered
//! list of passes, and serialized to an HTML fragment.

mod passes;
mod renderer;
mod token;

pub use passes::{Pass, STANDARD_PASSES};
pub use renderer::{Fragment, InlineRenderer, RenderMode, render};
pub use token::{Tag, Token, tokenize};
