//! Widget shell component

use maud::{Markup, html};

use crate::widget::WidgetConfig;

/// Data container for widget shell rendering.
pub struct ShellData<'a> {
    pub container: &'a str,
    pub config: &'a WidgetConfig,
    pub open: bool,
    /// Already rendered message bubbles.
    pub messages: Markup,
}

/// Renders chat widget root with window and toggle button
///
/// Static markup: the root element carries only the container id, and no
/// client script is attached. Visibility of the window and the toggle
/// button is driven by the `chatlet-open` class.
///
/// # Arguments
///
/// * `data`: Shell data with container, configuration, state and messages
///
/// # Returns
///
/// Widget markup ready for insertion into a host page
pub fn widget(data: ShellData<'_>) -> Markup {
    let root_class = if data.open {
        "chatlet chatlet-open"
    } else {
        "chatlet"
    };

    html! {
        div id=(data.container) class=(root_class) {
            div class="chatlet-window" {
                div class="chatlet-header" {
                    span class="chatlet-title" { (data.config.title) }
                    button type="button" class="chatlet-close" aria-label="Close" {
                        (data.config.close_label)
                    }
                }
                div class="chatlet-messages" {
                    (data.messages)
                }
                div class="chatlet-input-area" {
                    input type="text" class="chatlet-input" placeholder=(data.config.placeholder);
                    button type="button" class="chatlet-send" { (data.config.send_label) }
                }
            }
            button type="button" class="chatlet-toggle" aria-label="Open chat" {
                (data.config.toggle_label)
            }
        }
    }
}
