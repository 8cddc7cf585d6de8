use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, GlyphId, PxScale, Rect, ScaleFont, point};
use image::RgbaImage;

use crate::engine::bridge::text::{TextBounds, TextMeasureError, TextMeasurer, TextPainter};
use crate::engine::color::ColorValue;
use crate::error::GenError;

/// 読み込み済みのフォント（サイズ未定）
pub struct FontFace {
    name: String,
    font: FontArc,
}

impl FontFace {
    /// フォントファイルを読み込む。ファイルはここで閉じる
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let bytes = std::fs::read(path)
            .map_err(|e| GenError::FontLoad(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&path.display().to_string(), bytes)
    }

    /// バイト列からフォントを読み込む (TTF / OTF / TTC の先頭フェイス)
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Self, GenError> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| GenError::FontLoad(format!("{name}: {e}")))?;
        Ok(Self {
            name: name.to_string(),
            font,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// em ボックスが `size` ピクセルになるハンドルを作る
    pub fn at_size(&self, size: u32) -> Result<SizedFont<'_>, TextMeasureError> {
        if size == 0 {
            return Err(TextMeasureError::UnsupportedSize(size));
        }
        let units_per_em = self
            .font
            .units_per_em()
            .ok_or_else(|| TextMeasureError::MalformedFont(format!("{}: no units per em", self.name)))?;
        // ab_glyph の PxScale は ascent - descent の高さなので em 基準に換算する
        let scale = PxScale::from(size as f32 * self.font.height_unscaled() / units_per_em);
        Ok(SizedFont {
            font: &self.font,
            size,
            scale,
        })
    }
}

/// 特定のピクセルサイズに固定したフォント
pub struct SizedFont<'a> {
    font: &'a FontArc,
    size: u32,
    scale: PxScale,
}

impl SizedFont<'_> {
    pub fn size(&self) -> u32 {
        self.size
    }

    /// 1行に並べる。原点は行ボックス左上（ベースラインは ascent の位置）
    fn layout_glyphs(&self, text: &str) -> Vec<Glyph> {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = scaled.ascent();

        let mut caret = 0.0;
        let mut prev: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, baseline)));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        glyphs
    }

    /// インクの外接矩形。空白だけのテキストは全て 0
    pub fn bounds(&self, text: &str) -> TextBounds {
        let mut acc: Option<Rect> = None;
        for glyph in self.layout_glyphs(text) {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let b = outlined.px_bounds();
            acc = Some(match acc {
                None => b,
                Some(r) => Rect {
                    min: point(r.min.x.min(b.min.x), r.min.y.min(b.min.y)),
                    max: point(r.max.x.max(b.max.x), r.max.y.max(b.max.y)),
                },
            });
        }

        acc.map(|r| {
            TextBounds::new(
                r.min.x.floor() as i32,
                r.min.y.floor() as i32,
                r.max.x.ceil() as i32,
                r.max.y.ceil() as i32,
            )
        })
        .unwrap_or_default()
    }

    /// キャンバス外のピクセルは捨てる
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, origin: (i32, i32), color: ColorValue) {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        for glyph in self.layout_glyphs(text) {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let b = outlined.px_bounds();
            let (gx, gy) = (origin.0 + b.min.x as i32, origin.1 + b.min.y as i32);
            outlined.draw(|x, y, coverage| {
                let px = gx + x as i32;
                let py = gy + y as i32;
                if px < 0 || py < 0 || px >= w || py >= h {
                    return;
                }
                color.blend_onto(canvas.get_pixel_mut(px as u32, py as u32), coverage);
            });
        }
    }
}

impl TextMeasurer for FontFace {
    fn measure(&self, text: &str, size: u32) -> Result<TextBounds, TextMeasureError> {
        Ok(self.at_size(size)?.bounds(text))
    }
}

impl TextPainter for FontFace {
    fn paint(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size: u32,
        origin: (i32, i32),
        color: ColorValue,
    ) -> Result<(), TextMeasureError> {
        self.at_size(size)?.draw(canvas, text, origin, color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::font::resolve_font;

    fn system_face() -> Option<FontFace> {
        let path = match resolve_font() {
            Ok(p) => p,
            Err(_) => {
                eprintln!("skipping FontFace test: no system font found");
                return None;
            }
        };
        FontFace::load(&path).ok()
    }

    #[test]
    fn garbage_bytes_are_a_font_error() {
        match FontFace::from_bytes("junk", vec![0u8; 64]) {
            Err(GenError::FontLoad(msg)) => assert!(msg.starts_with("junk")),
            Err(other) => panic!("expected FontLoad, got {other:?}"),
            Ok(_) => panic!("garbage parsed as a font"),
        }
    }

    #[test]
    fn missing_file_is_a_font_error() {
        let res = FontFace::load(Path::new("/no/such/font.ttf"));
        assert!(matches!(res, Err(GenError::FontLoad(_))));
    }

    #[test]
    fn system_font_bounds_grow_with_size() {
        let Some(face) = system_face() else { return };

        let small = face.measure("123", 20).expect("measure");
        let large = face.measure("123", 80).expect("measure");
        assert!(small.width() > 0 && small.height() > 0);
        assert!(large.width() > small.width());
        assert!(large.height() > small.height());
        // 数字の上端は ascent より下にある
        assert!(large.top >= 0);
        assert_eq!(face.measure("123", 0), Err(TextMeasureError::UnsupportedSize(0)));
    }

    #[test]
    fn system_font_whitespace_has_empty_bounds() {
        let Some(face) = system_face() else { return };
        assert_eq!(face.measure("   ", 40).unwrap(), TextBounds::default());
    }

    #[test]
    fn system_font_paints_inside_measured_box() {
        let Some(face) = system_face() else { return };

        let mut canvas = RgbaImage::new(200, 200);
        let bounds = face.measure("8", 100).unwrap();
        face.paint(&mut canvas, "8", 100, (0, 0), ColorValue::BLACK).unwrap();

        let mut painted = 0;
        for (x, y, px) in canvas.enumerate_pixels() {
            if px.0[3] > 0 {
                painted += 1;
                assert!((x as i32) >= bounds.left && (x as i32) < bounds.right);
                assert!((y as i32) >= bounds.top && (y as i32) < bounds.bottom);
            }
        }
        assert!(painted > 0);
    }
}
