use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::engine::bridge::text::{TextMeasureError, TextPainter};
use crate::engine::color::ColorValue;
use crate::error::GenError;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Webp,
}

impl ImageFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Webp => "webp",
        }
    }

    /// アルファチャンネルを保存できるか
    pub const fn has_alpha(self) -> bool {
        !matches!(self, ImageFormat::Jpg)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "webp" => Ok(ImageFormat::Webp),
            _ => Err(GenError::InvalidConfig(format!(
                "unknown image format \"{s}\": expected png, jpg or webp"
            ))),
        }
    }
}

/// 描画先のキャンバス。保存時に形式に応じてエンコードする
pub struct Canvas {
    image: RgbaImage,
    format: ImageFormat,
}

impl Canvas {
    /// JPEG では背景のアルファを捨てる
    pub fn new(width: u32, height: u32, background: ColorValue, format: ImageFormat) -> Self {
        let background = if format.has_alpha() {
            background
        } else {
            background.opaque()
        };
        Self {
            image: RgbaImage::from_pixel(width, height, background.to_rgba()),
            format,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn draw_text(
        &mut self,
        painter: &dyn TextPainter,
        text: &str,
        size: u32,
        origin: (i32, i32),
        color: ColorValue,
    ) -> Result<(), TextMeasureError> {
        let color = if self.format.has_alpha() {
            color
        } else {
            color.opaque()
        };
        painter.paint(&mut self.image, text, size, origin, color)
    }

    /// メモリ上にエンコードする。`quality` は JPEG のみ有効
    pub fn encode(&self, quality: u8) -> anyhow::Result<Vec<u8>> {
        let (w, h) = self.image.dimensions();
        let mut buf = Vec::new();
        match self.format {
            ImageFormat::Png => {
                PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive)
                    .write_image(self.image.as_raw(), w, h, ExtendedColorType::Rgba8)
                    .context("PNG encoding failed")?;
            }
            ImageFormat::Jpg => {
                let rgb: Vec<u8> = self
                    .image
                    .pixels()
                    .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                    .collect();
                JpegEncoder::new_with_quality(&mut buf, quality)
                    .write_image(&rgb, w, h, ExtendedColorType::Rgb8)
                    .context("JPEG encoding failed")?;
            }
            ImageFormat::Webp => {
                // image crate の WebP エンコーダは可逆のみ
                WebPEncoder::new_lossless(&mut buf)
                    .write_image(self.image.as_raw(), w, h, ExtendedColorType::Rgba8)
                    .context("WebP encoding failed")?;
            }
        }
        Ok(buf)
    }

    /// エンコードしてから一度に書き出すので、失敗時に中途半端なファイルは残らない
    pub fn save(&self, path: &Path, quality: u8) -> Result<(), GenError> {
        let bytes = self
            .encode(quality)
            .map_err(|e| GenError::io(path, std::io::Error::other(format!("{e:#}"))))?;
        std::fs::write(path, bytes).map_err(|e| GenError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bridge::text::FallbackTextMeasurer;

    #[test]
    fn format_parsing() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!("webp".parse::<ImageFormat>().unwrap(), ImageFormat::Webp);
        assert!(matches!(
            "gif".parse::<ImageFormat>(),
            Err(GenError::InvalidConfig(_))
        ));
        assert_eq!(ImageFormat::Jpg.to_string(), "jpg");
    }

    #[test]
    fn jpeg_canvas_is_opaque() {
        let canvas = Canvas::new(4, 4, ColorValue::rgba(10, 20, 30, 0), ImageFormat::Jpg);
        assert_eq!(canvas.image().get_pixel(0, 0).0, [10, 20, 30, 255]);
        let canvas = Canvas::new(4, 4, ColorValue::rgba(10, 20, 30, 0), ImageFormat::Png);
        assert_eq!(canvas.image().get_pixel(0, 0).0, [10, 20, 30, 0]);
    }

    #[test]
    fn png_encoding_keeps_pixels() {
        let mut canvas = Canvas::new(30, 20, ColorValue::rgb(200, 200, 200), ImageFormat::Png);
        canvas
            .draw_text(&FallbackTextMeasurer::default(), "1", 10, (0, 0), ColorValue::BLACK)
            .unwrap();
        let bytes = canvas.encode(90).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (30, 20));
        assert_eq!(decoded.get_pixel(29, 19).0, [200, 200, 200, 255]);
        assert_eq!(decoded.get_pixel(0, 2).0, [0, 0, 0, 255]);
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Png
        );
    }

    #[test]
    fn jpeg_and_webp_encode_to_their_containers() {
        let canvas = Canvas::new(16, 8, ColorValue::rgb(255, 0, 0), ImageFormat::Jpg);
        let bytes = canvas.encode(90).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
        assert_eq!(image::load_from_memory(&bytes).unwrap().width(), 16);

        let canvas = Canvas::new(16, 8, ColorValue::rgba(0, 0, 255, 128), ImageFormat::Webp);
        let bytes = canvas.encode(90).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::WebP);
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(3, 3).0, [0, 0, 255, 128]);
    }
}
