//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Widget stylesheet, positioned fixed in the bottom right corner.
pub const WIDGET_CSS: &str = include_str!("../assets/widget.css");

/// File name of the bundled stylesheet inside the assets directory.
pub const WIDGET_CSS_NAME: &str = "widget.css";

/// Writes all bundled CSS assets to output directory
pub fn write_css_assets(assets_dir: &Path) -> Result<()> {
    write_bundled(assets_dir, WIDGET_CSS_NAME, &[WIDGET_CSS])
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
