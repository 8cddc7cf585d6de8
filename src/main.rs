use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use dummy_img_gen::app::{self, BatchConfig, GeneratorConfig, ImageFormat};
use dummy_img_gen::engine::color::{ColorValue, parse_color};
use dummy_img_gen::platform::font::resolve_font;
use dummy_img_gen::platform::renderer::text_measurer::FontFace;

#[derive(Parser)]
#[command(
    version,
    about = "Generate numbered placeholder images for development and testing"
)]
struct Cli {
    /// Directory to save images
    output_dir: PathBuf,

    /// Number of images to generate
    #[arg(long, default_value_t = 10)]
    count: u32,

    /// First number in sequence
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    start: i64,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Background color (hex/name)
    #[arg(long, default_value = "#cccccc", value_parser = parse_color_arg)]
    bg_color: ColorValue,

    /// Text color (hex/name)
    #[arg(long, default_value = "#333333", value_parser = parse_color_arg)]
    text_color: ColorValue,

    /// Image format: png, jpg or webp
    #[arg(long, default_value = "png", value_parser = parse_format_arg)]
    format: ImageFormat,

    /// Filename prefix
    #[arg(long, default_value = "img_")]
    prefix: String,

    /// Path to custom font (.ttf/.otf)
    #[arg(long, env = "DUMMY_IMG_FONT")]
    font_path: Option<PathBuf>,

    /// Font size (auto-calculated if omitted)
    #[arg(long)]
    font_size: Option<u32>,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 90)]
    jpg_quality: u8,

    /// Overwrite existing files
    #[arg(long)]
    overwrite: bool,

    /// Padding around text (0.0-0.5)
    #[arg(long, default_value_t = 0.2)]
    padding: f64,
}

fn parse_color_arg(s: &str) -> Result<ColorValue, String> {
    parse_color(s).map_err(|e| e.to_string())
}

fn parse_format_arg(s: &str) -> Result<ImageFormat, String> {
    s.parse::<ImageFormat>().map_err(|e| e.to_string())
}

impl Cli {
    fn configs(&self) -> (BatchConfig, GeneratorConfig) {
        let batch = BatchConfig {
            output_dir: self.output_dir.clone(),
            count: self.count,
            start: self.start,
            prefix: self.prefix.clone(),
        };
        let config = GeneratorConfig {
            width: self.width,
            height: self.height,
            background: self.bg_color,
            text_color: self.text_color,
            format: self.format,
            font_size: self.font_size,
            quality: self.jpg_quality,
            overwrite: self.overwrite,
            padding: self.padding,
        };
        (batch, config)
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let (batch, config) = cli.configs();
    config.validate()?;

    // 明示指定 > 環境変数 (clap が吸収) > システムフォント探索
    let font_path = match &cli.font_path {
        Some(p) => p.clone(),
        None => resolve_font()?,
    };
    let font = FontFace::load(&font_path)
        .with_context(|| format!("cannot use font {}", font_path.display()))?;
    log::info!("font: {}", font.name());

    let report = app::generate_batch(&batch, &config, &font)?;
    println!(
        "\nSuccessfully generated {} images in {}",
        report.completed(),
        batch.output_dir.display()
    );
    if !report.is_success() {
        println!("{} image(s) failed", report.failed.len());
    }
    Ok(report.is_success())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            log::debug!("{e:?}");
            println!("Error: {e:#}");
            process::exit(1);
        }
    }
}
