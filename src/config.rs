//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::markdown::RenderMode;
use crate::widget::{DEFAULT_API_URL, DEFAULT_CONTAINER, WidgetConfig};

/// Command line configuration for chatlet.
///
/// Flags take precedence over environment variables, which take
/// precedence over built in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "chatlet", version, about, long_about = None)]
pub struct Config {
    /// Chat endpoint receiving `{"message": ...}` posts
    #[arg(long, global = true, env = "CHATLET_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Widget header title
    #[arg(long, global = true, env = "CHATLET_TITLE", default_value = "Assistant")]
    pub title: String,

    /// Input placeholder text
    #[arg(long, global = true, env = "CHATLET_PLACEHOLDER", default_value = "Type a question...")]
    pub placeholder: String,

    /// Bot reply shown when the endpoint can not be reached
    #[arg(long, global = true, env = "CHATLET_ERROR_TEXT", default_value = "Connection error.")]
    pub error_text: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "CHATLET_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Escape HTML in message text before rendering
    #[arg(long, global = true, env = "CHATLET_ESCAPE_HTML")]
    pub escape_html: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render message text from a file or stdin and print the HTML fragment
    Render {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Send one message to the chat endpoint and print the rendered reply
    Send {
        /// Message text
        message: String,
    },

    /// Write a static host page with the widget mounted
    Page {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// JSON transcript (`[{"text": ..., "sender": "user"|"bot"}]`) shown in the widget
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Container element id
        #[arg(long, default_value = DEFAULT_CONTAINER)]
        container: String,

        /// Do not open the page in a browser
        #[arg(long)]
        no_open: bool,
    },
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not an http(s) URL, the timeout is
    /// zero, or a referenced transcript file does not exist.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            bail!("API URL must start with http:// or https://: {}", self.api_url);
        }

        if self.timeout_secs == 0 {
            bail!("Timeout must be at least one second");
        }

        if let Command::Page {
            transcript: Some(path),
            ..
        } = &self.command
            && !path.exists()
        {
            bail!("Transcript file does not exist: {}", path.display());
        }

        Ok(())
    }

    /// Returns render mode selected by `--escape-html`.
    pub fn render_mode(&self) -> RenderMode {
        if self.escape_html {
            RenderMode::Escaped
        } else {
            RenderMode::Raw
        }
    }

    /// Builds widget configuration from command line values.
    pub fn widget_config(&self) -> WidgetConfig {
        WidgetConfig {
            api_url: self.api_url.clone(),
            title: self.title.clone(),
            placeholder: self.placeholder.clone(),
            error_text: self.error_text.clone(),
            render_mode: self.render_mode(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..WidgetConfig::default()
        }
    }
}
