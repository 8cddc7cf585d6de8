use image::RgbaImage;

use super::{TextBounds, TextMeasureError, TextMeasurer, TextPainter};
use crate::engine::color::ColorValue;

/// Fallback text measurer.
///
/// This implementation does not rely on any font engine.
/// It uses a simple heuristic based on font size and character count,
/// and paints every character as a solid block.
/// Intended for testing and environments without font support.
#[derive(Debug, Clone)]
pub struct FallbackTextMeasurer {
    /// 1文字あたりの送り幅 (font size に対する %)
    pub char_advance_pct: u32,
    /// 行ボックス上端からインク上端までの距離 (%)
    pub top_bearing_pct: u32,
    /// インクの高さ (%)
    pub ink_height_pct: u32,
}

impl Default for FallbackTextMeasurer {
    fn default() -> Self {
        Self {
            char_advance_pct: 60,
            top_bearing_pct: 20,
            ink_height_pct: 70,
        }
    }
}

impl FallbackTextMeasurer {
    fn char_advance(&self, size: u32) -> u32 {
        size * self.char_advance_pct / 100
    }
}

impl TextMeasurer for FallbackTextMeasurer {
    fn measure(&self, text: &str, size: u32) -> Result<TextBounds, TextMeasureError> {
        if size == 0 {
            return Err(TextMeasureError::UnsupportedSize(size));
        }
        let length = text.chars().count() as u32;

        // 上端と下端を別々に丸めるとサイズに対して単調でなくなるので高さは直接求める
        let top = size * self.top_bearing_pct / 100;
        let height = (size * self.ink_height_pct).div_ceil(100);
        let right = (length * size * self.char_advance_pct).div_ceil(100);

        Ok(TextBounds::new(
            0,
            top as i32,
            right as i32,
            (top + height) as i32,
        ))
    }
}

impl TextPainter for FallbackTextMeasurer {
    fn paint(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size: u32,
        origin: (i32, i32),
        color: ColorValue,
    ) -> Result<(), TextMeasureError> {
        let bounds = self.measure(text, size)?;
        let advance = self.char_advance(size) as i32;
        // ブロック同士の隙間ぶん削る
        let block_w = (advance * 4 / 5).max(1);

        let (w, h) = canvas.dimensions();
        let y0 = origin.1 + bounds.top;
        let y1 = origin.1 + bounds.bottom;
        for i in 0..text.chars().count() as i32 {
            let x0 = origin.0 + i * advance;
            let x1 = x0 + block_w;
            for y in y0.max(0)..y1.min(h as i32) {
                for x in x0.max(0)..x1.min(w as i32) {
                    color.blend_onto(canvas.get_pixel_mut(x as u32, y as u32), 1.0);
                }
            }
        }
        Ok(())
    }
}
