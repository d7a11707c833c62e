//! Host page layout component

use maud::{DOCTYPE, Markup, html};

/// Wraps widget markup in a standalone host page
///
/// Provides DOCTYPE, charset, viewport and stylesheet links. The widget is
/// positioned by its own stylesheet so the body only needs the caller's
/// content.
///
/// # Arguments
///
/// * `title`: Page title text
/// * `stylesheets`: CSS file paths to include
/// * `body`: Page body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, stylesheets: &[&str], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                (body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wrapper_links_stylesheets() {
        // Arrange
        let body = html! { p { "hello" } };

        // Act
        let html = page_wrapper("Demo", &["assets/widget.css"], body).into_string();

        // Assert
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Demo</title>"));
        assert!(html.contains("href=\"assets/widget.css\""));
        assert!(html.contains("<p>hello</p>"));
    }
}
