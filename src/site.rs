//! Static host page generation.

use anyhow::{Context, Result};
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::assets::{WIDGET_CSS_NAME, write_css_assets};
use crate::components::layout::page_wrapper;
use crate::transport::Transport;
use crate::widget::Widget;

/// Builds host page markup embedding the widget.
pub fn host_page<T: Transport>(widget: &Widget<T>) -> Markup {
    let stylesheet = format!("assets/{}", WIDGET_CSS_NAME);

    page_wrapper(
        &widget.config().title,
        &[stylesheet.as_str()],
        html! {
            main class="chatlet-host" {
                (widget.markup())
            }
        },
    )
}

/// Writes host page and its assets into output directory.
///
/// Creates `index.html` and `assets/widget.css`, creating directories as
/// needed.
///
/// # Returns
///
/// Path of the written `index.html`
///
/// # Errors
///
/// Returns error if directories or files can not be written
pub fn write_site<T: Transport>(output: &Path, widget: &Widget<T>) -> Result<PathBuf> {
    let assets_dir = output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;

    write_css_assets(&assets_dir)?;

    let index_path = output.join("index.html");
    fs::write(&index_path, host_page(widget).into_string())
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    info!(path = %index_path.display(), "generated host page");
    Ok(index_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;
    use crate::widget::WidgetConfig;
    use anyhow::bail;

    struct Offline;

    impl Transport for Offline {
        fn send(&self, _message: &str) -> Result<String> {
            bail!("offline")
        }
    }

    #[test]
    fn test_host_page_embeds_widget() {
        // Arrange
        let mut widget =
            Widget::mount("chat", WidgetConfig::default(), Offline).expect("Should mount");
        widget.add_message(Message::bot("Hi **there**"));

        // Act
        let html = host_page(&widget).into_string();

        // Assert
        assert!(html.contains("<title>Assistant</title>"));
        assert!(html.contains("href=\"assets/widget.css\""));
        assert!(html.contains("<div id=\"chat\""));
        assert!(html.contains("Hi <b>there</b>"));
    }

    #[test]
    fn test_write_site_creates_files() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let output = dir.path().join("dist");
        let widget =
            Widget::mount("chat", WidgetConfig::default(), Offline).expect("Should mount");

        // Act
        let index = write_site(&output, &widget).expect("Should write site");

        // Assert
        assert_eq!(index, output.join("index.html"));
        assert!(index.exists());
        assert!(output.join("assets").join("widget.css").exists());
    }
}
