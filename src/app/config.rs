use std::path::PathBuf;

use crate::engine::color::ColorValue;
use crate::error::GenError;
pub use crate::platform::renderer::image::ImageFormat;

/// 1枚ごとの描画設定
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub width: u32,
    pub height: u32,
    pub background: ColorValue,
    pub text_color: ColorValue,
    pub format: ImageFormat,
    /// None なら自動で決める
    pub font_size: Option<u32>,
    /// JPEG 品質 (1–100)
    pub quality: u8,
    pub overwrite: bool,
    /// 上下左右に空ける割合 (0.0–0.5 未満)
    pub padding: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: ColorValue::rgb(0xcc, 0xcc, 0xcc),
            text_color: ColorValue::rgb(0x33, 0x33, 0x33),
            format: ImageFormat::Png,
            font_size: None,
            quality: 90,
            overwrite: false,
            padding: 0.2,
        }
    }
}

impl GeneratorConfig {
    pub fn canvas(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// テキストがキャンバスに占めてよい割合
    pub fn fit_ratio(&self) -> f64 {
        1.0 - 2.0 * self.padding
    }

    pub fn validate(&self) -> Result<(), GenError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenError::InvalidConfig(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..0.5).contains(&self.padding) {
            return Err(GenError::InvalidConfig(format!(
                "padding must be in [0.0, 0.5), got {}",
                self.padding
            )));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(GenError::InvalidConfig(format!(
                "quality must be in 1..=100, got {}",
                self.quality
            )));
        }
        if self.font_size == Some(0) {
            return Err(GenError::InvalidConfig("font size must be positive".into()));
        }
        Ok(())
    }
}

/// 連番の範囲と出力先
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    pub count: u32,
    pub start: i64,
    pub prefix: String,
}

impl BatchConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            count: 10,
            start: 1,
            prefix: "img_".to_string(),
        }
    }

    pub fn numbers(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.count as i64).map(|i| self.start + i)
    }

    /// `<prefix><number>.<ext>`
    pub fn path_for(&self, number: i64, format: ImageFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.{}", self.prefix, number, format.extension()))
    }
}
