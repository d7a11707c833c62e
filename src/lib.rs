//! Embeddable chat widget with an inline Markdown-subset renderer.

mod assets;
pub mod components;
mod config;
mod conversation;
mod markdown;
mod site;
mod transport;
mod widget;

pub use assets::{WIDGET_CSS, write_css_assets};
pub use config::{Command, Config};
pub use conversation::{Conversation, Message, Sender};
pub use markdown::{
    Fragment, InlineRenderer, Pass, RenderMode, STANDARD_PASSES, Tag, Token, render, tokenize,
};
pub use site::{host_page, write_site};
pub use transport::{ChatReply, ChatRequest, HttpTransport, Transport};
pub use widget::{DEFAULT_API_URL, DEFAULT_CONTAINER, Widget, WidgetConfig};
