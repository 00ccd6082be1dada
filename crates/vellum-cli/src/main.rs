use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use vellum_engine::logging::{LoggingConfig, init_logging};
use vellum_scene::{Compression, FontMap, RenderOptions, Renderer};

#[derive(Parser)]
#[command(name = "vellum")]
#[command(about = "Render a JSON scene description to PNG", long_about = None)]
struct Cli {
    /// Scene document (JSON)
    scene: PathBuf,

    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,

    /// Font to load, as NAME=PATH (repeatable)
    #[arg(long = "font", value_name = "NAME=PATH", value_parser = parse_font)]
    fonts: Vec<(String, PathBuf)>,

    /// PNG compression effort
    #[arg(long, value_enum, default_value_t = CompressionArg::Default)]
    compression: CompressionArg,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long)]
    log_filter: Option<String>,
}

#[derive(Copy, Clone, ValueEnum)]
enum CompressionArg {
    Fast,
    Default,
    Best,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Fast => Compression::Fast,
            CompressionArg::Default => Compression::Default,
            CompressionArg::Best => Compression::Best,
        }
    }
}

fn parse_font(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got `{arg}`")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(match &cli.log_filter {
        Some(filter) => LoggingConfig::with_filter(filter.as_str()),
        None => LoggingConfig::default(),
    });

    let scene = std::fs::read_to_string(&cli.scene)
        .with_context(|| format!("reading scene {}", cli.scene.display()))?;

    let mut fonts = FontMap::new();
    for (name, path) in &cli.fonts {
        let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        fonts.insert(name.clone(), bytes);
    }

    let renderer = Renderer::new(RenderOptions {
        compression: cli.compression.into(),
        ..RenderOptions::default()
    });
    let png = renderer
        .render(&scene, &fonts)
        .with_context(|| format!("rendering {}", cli.scene.display()))?;

    std::fs::write(&cli.output, &png)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("wrote {} ({} bytes)", cli.output.display(), png.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_flag_splits_on_the_first_equals() {
        let (name, path) = parse_font("Body=fonts/a=b.ttf").unwrap();
        assert_eq!(name, "Body");
        assert_eq!(path, PathBuf::from("fonts/a=b.ttf"));
        assert!(parse_font("Body").is_err());
        assert!(parse_font("=x.ttf").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
