//! Chat widget lifecycle.
//!
//! A widget is mounted explicitly into a named container with its own
//! configuration and transport, holds the visible conversation, and renders
//! its complete markup on demand.

use anyhow::{Result, bail};
use maud::Markup;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::components::shell;
use crate::conversation::{Conversation, Message};
use crate::markdown::{InlineRenderer, RenderMode};
use crate::transport::Transport;

/// Default chat endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/chat";

/// Default container element id.
pub const DEFAULT_CONTAINER: &str = "chatlet-widget";

/// Endpoint, copy strings, and rendering options for one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub api_url: String,
    pub title: String,
    pub placeholder: String,
    pub send_label: String,
    pub toggle_label: String,
    pub close_label: String,
    /// Bot reply shown when the transport fails.
    pub error_text: String,
    pub render_mode: RenderMode,
    pub timeout: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            title: "Assistant".to_string(),
            placeholder: "Type a question...".to_string(),
            send_label: "➤".to_string(),
            toggle_label: "💬".to_string(),
            close_label: "X".to_string(),
            error_text: "Connection error.".to_string(),
            render_mode: RenderMode::Raw,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Mounted chat widget.
pub struct Widget<T> {
    container: String,
    config: WidgetConfig,
    renderer: InlineRenderer,
    conversation: Conversation,
    open: bool,
    transport: T,
}

impl<T: Transport> Widget<T> {
    /// Mounts widget into container with given configuration.
    ///
    /// The widget starts closed with an empty conversation.
    ///
    /// # Errors
    ///
    /// Returns error if container id is empty or contains whitespace.
    pub fn mount(container: impl Into<String>, config: WidgetConfig, transport: T) -> Result<Self> {
        let container = container.into();

        if container.is_empty() {
            bail!("Container id must not be empty");
        }
        if container.chars().any(char::is_whitespace) {
            bail!("Container id must not contain whitespace: {:?}", container);
        }

        info!(container = %container, api_url = %config.api_url, "mounted chat widget");

        Ok(Self {
            renderer: InlineRenderer::with_mode(config.render_mode),
            container,
            config,
            conversation: Conversation::new(),
            open: false,
            transport,
        })
    }

    /// Detaches widget. Conversation is discarded.
    pub fn unmount(self) {
        info!(
            container = %self.container,
            messages = self.conversation.len(),
            "unmounted chat widget"
        );
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Shows chat window and hides toggle button.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides chat window and shows toggle button.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Appends message to the visible conversation.
    pub fn add_message(&mut self, message: Message) -> &Message {
        self.conversation.push(message)
    }

    /// Sends user input and appends both sides of the exchange.
    ///
    /// Input is trimmed; blank input is ignored and returns `None`. When the
    /// transport fails the configured error text becomes the bot reply.
    ///
    /// # Returns
    ///
    /// Bot message appended for this input
    pub fn send(&mut self, input: &str) -> Option<&Message> {
        let text = input.trim();
        if text.is_empty() {
            debug!("ignoring blank input");
            return None;
        }

        self.conversation.push(Message::user(text));

        let reply = match self.transport.send(text) {
            Ok(reply) => reply,
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(error = %reason, "chat request failed");
                self.config.error_text.clone()
            }
        };

        Some(self.conversation.push(Message::bot(reply)))
    }

    /// Renders complete widget markup for the current state.
    pub fn markup(&self) -> Markup {
        shell::widget(shell::ShellData {
            container: &self.container,
            config: &self.config,
            open: self.open,
            messages: self.conversation.render(&self.renderer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;

    /// Transport answering from a fixed script and recording requests.
    struct ScriptedTransport {
        replies: RefCell<Vec<Result<String>>>,
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: RefCell::new(replies),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn send(&self, message: &str) -> Result<String> {
            self.seen.borrow_mut().push(message.to_string());
            self.replies.borrow_mut().remove(0)
        }
    }

    #[test]
    fn test_mount_starts_closed_and_empty() {
        // Arrange & Act
        let widget = Widget::mount("chat", WidgetConfig::default(), ScriptedTransport::new(vec![]))
            .expect("Should mount");

        // Assert
        assert!(!widget.is_open());
        assert!(widget.conversation().is_empty());
        assert_eq!(widget.container(), "chat");
    }

    #[test]
    fn test_mount_rejects_bad_container() {
        let empty = Widget::mount("", WidgetConfig::default(), ScriptedTransport::new(vec![]));
        let spaced = Widget::mount("a b", WidgetConfig::default(), ScriptedTransport::new(vec![]));
        assert!(empty.is_err());
        assert!(spaced.is_err());
    }

    #[test]
    fn test_open_close_toggle() {
        // Arrange
        let mut widget =
            Widget::mount("chat", WidgetConfig::default(), ScriptedTransport::new(vec![]))
                .expect("Should mount");

        // Act & Assert
        widget.toggle();
        assert!(widget.is_open());
        widget.close();
        assert!(!widget.is_open());
        widget.open();
        assert!(widget.is_open());
        widget.toggle();
        assert!(!widget.is_open());
    }

    #[test]
    fn test_send_appends_exchange() {
        // Arrange
        let transport = ScriptedTransport::new(vec![Ok("**hi**".to_string())]);
        let mut widget =
            Widget::mount("chat", WidgetConfig::default(), &transport).expect("Should mount");

        // Act
        let reply = widget.send("  hello  ").cloned();

        // Assert
        assert_eq!(reply, Some(Message::bot("**hi**")));
        assert_eq!(*transport.seen.borrow(), ["hello"]);
        let texts: Vec<&str> = widget.conversation().iter().map(Message::text).collect();
        assert_eq!(texts, ["hello", "**hi**"]);
    }

    #[test]
    fn test_send_blank_is_ignored() {
        // Arrange
        let transport = ScriptedTransport::new(vec![]);
        let mut widget =
            Widget::mount("chat", WidgetConfig::default(), &transport).expect("Should mount");

        // Act
        let reply = widget.send(" \n\t ");

        // Assert
        assert!(reply.is_none());
        assert!(widget.conversation().is_empty());
        assert!(transport.seen.borrow().is_empty(), "No request for blank input");
    }

    #[test]
    fn test_send_failure_uses_error_text() {
        // Arrange
        let config = WidgetConfig {
            error_text: "Offline.".to_string(),
            ..WidgetConfig::default()
        };
        let transport = ScriptedTransport::new(vec![Err(anyhow!("refused"))]);
        let mut widget = Widget::mount("chat", config, transport).expect("Should mount");

        // Act
        let reply = widget.send("ping").map(|m| m.text().to_string());

        // Assert
        assert_eq!(reply.as_deref(), Some("Offline."));
        assert_eq!(widget.conversation().len(), 2);
    }

    #[test]
    fn test_markup_renders_messages_with_mode() {
        // Arrange
        let config = WidgetConfig {
            render_mode: RenderMode::Escaped,
            ..WidgetConfig::default()
        };
        let transport = ScriptedTransport::new(vec![Ok("<b>x</b> **y**".to_string())]);
        let mut widget = Widget::mount("chat", config, transport).expect("Should mount");
        widget.send("q");

        // Act
        let html = widget.markup().into_string();

        // Assert
        assert!(
            html.contains("<div class=\"msg bot\">&lt;b&gt;x&lt;/b&gt; <b>y</b></div>"),
            "Bot reply should be escaped then rewritten: {}",
            html
        );
        assert!(html.contains("<div class=\"msg user\">q</div>"));
    }
}
