use anyhow::{Context, Result};
use chatlet::{
    Command, Config, Conversation, DEFAULT_CONTAINER, HttpTransport, InlineRenderer, Widget,
    write_site,
};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Drops the single line ending that terminates piped or file input.
fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

fn load_transcript(path: &Path) -> Result<Conversation> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse transcript: {}", path.display()))
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let widget_config = config.widget_config();

    match &config.command {
        Command::Render { file } => {
            let text = read_input(file.as_deref())?;
            let renderer = InlineRenderer::with_mode(config.render_mode());
            println!("{}", renderer.render(strip_final_newline(&text)));
        }
        Command::Send { message } => {
            let transport = HttpTransport::new(&widget_config.api_url, widget_config.timeout)?;
            let mut widget = Widget::mount(DEFAULT_CONTAINER, widget_config, &transport)?;

            if let Some(reply) = widget.send(message) {
                let html = InlineRenderer::with_mode(config.render_mode()).render(reply.text());
                println!("{}", html);
            }
            widget.unmount();
        }
        Command::Page {
            output,
            transcript,
            container,
            no_open,
        } => {
            let transport = HttpTransport::new(&widget_config.api_url, widget_config.timeout)?;
            let mut widget = Widget::mount(container.as_str(), widget_config, &transport)?;

            if let Some(path) = transcript {
                for message in load_transcript(path)? {
                    widget.add_message(message);
                }
                widget.open();
            }

            let index_path = write_site(output, &widget)?;
            println!("Generated: {}", index_path.display());

            if !no_open {
                open::that(&index_path)
                    .with_context(|| format!("Failed to open {}", index_path.display()))?;
            }
            widget.unmount();
        }
    }

    Ok(())
}
