use anyhow::Context;
use askama::Template;
use clap::{Parser, Subcommand};
use kite_laundry::{
    layout::{LayoutConfig, PatternLayoutEngine},
    pattern::Pattern,
    print::{PrintDocument, DEFAULT_TITLE},
    renderer::{Renderer, SVGRenderer},
    visualizer::draw_pattern,
};
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "kite-laundry", version, about = "Pattern schematics and printable articles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a JSON pattern description as an SVG schematic.
    Render {
        /// Pattern file. Reads stdin when omitted.
        input: Option<PathBuf>,
        /// Output file. Writes stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// JSON layout configuration.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Canvas units per millimeter.
        #[arg(long)]
        scale: Option<f64>,
    },
    /// Wrap an article fragment in a standalone, print-ready HTML document.
    Print {
        /// Article markup file. Reads stdin when omitted.
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kite_laundry=info".parse()?),
        )
        .init();

    match Cli::parse().command {
        Command::Render {
            input,
            output,
            config,
            scale,
        } => {
            let config = load_config(config.as_deref(), scale)?;
            let src = read_input(input.as_deref())?;
            let svg = render(&src, config)?;

            write_output(output.as_deref(), &svg)?;
        }
        Command::Print {
            input,
            output,
            title,
        } => {
            let body = read_input(input.as_deref())?;
            let document = PrintDocument::new(title, body.trim_end());

            write_output(output.as_deref(), &document.render()?)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, scale: Option<f64>) -> anyhow::Result<LayoutConfig> {
    let mut config = match path {
        Some(path) => {
            let src = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            LayoutConfig::from_json(&src)
                .with_context(|| format!("invalid layout configuration in {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };

    if let Some(scale) = scale {
        config.scale = scale;
        config.validate()?;
    }
    Ok(config)
}

fn render(src: &str, config: LayoutConfig) -> anyhow::Result<String> {
    let pattern = Pattern::from_json(src).context("invalid pattern")?;
    info!(pieces = pattern.pieces().len(), scale = config.scale, "rendering pattern");

    let engine = PatternLayoutEngine::new(config);
    let drawing = draw_pattern(&engine, &pattern)?;
    Ok(SVGRenderer::new().render_to_string(&drawing)?)
}

// Read the contents of a specified file or from stdio.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
        }
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("cannot write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
