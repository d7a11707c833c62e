//! Reusable HTML components for widget and page generation
//!
//! Maud component functions for the widget shell and the host page that
//! embeds it.

pub mod layout;
pub mod shell;
