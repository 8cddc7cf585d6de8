//! 連番プレースホルダー画像の生成

pub mod config;

use std::path::{Path, PathBuf};

pub use config::{BatchConfig, GeneratorConfig, ImageFormat};

use crate::engine::bridge::text::TextPainter;
use crate::engine::layout::{self, LayoutResult};
use crate::error::GenError;
use crate::platform::renderer::image::Canvas;

/// 1枚分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(PathBuf),
    /// 既に存在し、上書きしなかった
    Skipped(PathBuf),
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Outcome::Generated(p) | Outcome::Skipped(p) => p,
        }
    }
}

/// `number` を中央に描いた画像を `path` に保存する
pub fn generate_image(
    number: i64,
    path: &Path,
    config: &GeneratorConfig,
    font: &dyn TextPainter,
) -> Result<Outcome, GenError> {
    if path.exists() && !config.overwrite {
        println!("Skipping {} (already exists)", path.display());
        return Ok(Outcome::Skipped(path.to_path_buf()));
    }

    let text = number.to_string();
    let canvas_size = config.canvas();
    let LayoutResult {
        font_size, origin, ..
    } = match config.font_size {
        Some(size) => layout::layout_at_size(&text, canvas_size, font, size)?,
        None => layout::layout(&text, canvas_size, font, config.fit_ratio())?,
    };
    log::debug!(
        target: "Generator",
        "{}: {font_size}px at ({}, {})",
        path.display(),
        origin.0,
        origin.1
    );

    let mut canvas = Canvas::new(config.width, config.height, config.background, config.format);
    canvas.draw_text(font, &text, font_size, origin, config.text_color)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }
    canvas.save(path, config.quality)?;

    Ok(Outcome::Generated(path.to_path_buf()))
}

/// バッチ全体の結果
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, GenError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// 書き出した枚数とスキップした枚数の合計
    pub fn completed(&self) -> usize {
        self.generated.len() + self.skipped.len()
    }
}

/// 連番画像をまとめて生成する。
///
/// 1枚の失敗は報告だけして次に進む。出力ディレクトリが作れない、
/// あるいは設定が不正な場合のみ全体を中断する。
pub fn generate_batch(
    batch: &BatchConfig,
    config: &GeneratorConfig,
    font: &dyn TextPainter,
) -> Result<BatchReport, GenError> {
    config.validate()?;
    std::fs::create_dir_all(&batch.output_dir).map_err(|e| GenError::io(&batch.output_dir, e))?;

    let mut report = BatchReport::default();
    for number in batch.numbers() {
        let path = batch.path_for(number, config.format);
        match generate_image(number, &path, config, font) {
            Ok(Outcome::Generated(p)) => {
                println!("Generated: {}", p.display());
                report.generated.push(p);
            }
            Ok(Outcome::Skipped(p)) => report.skipped.push(p),
            Err(e) => {
                println!("Error generating {}: {e}", path.display());
                log::warn!(target: "Generator", "{}: {e:?}", path.display());
                report.failed.push((path, e));
            }
        }
    }

    log::info!(
        target: "Generator",
        "batch done: {} generated, {} skipped, {} failed",
        report.generated.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(report)
}
