//! Auto-fit text sizing and centering.
//!
//! The largest font size is found by a binary search over integer pixel
//! sizes. Glyph metrics are only known after the backend has laid the text
//! out, so there is no closed form for it; each probe costs one
//! [`TextMeasurer::measure`] call.

use crate::engine::bridge::text::{TextBounds, TextMeasurer};
use crate::error::GenError;

/// これ未満のサイズは探索しない
pub const MIN_FONT_SIZE: u32 = 10;

/// 選ばれたフォントサイズと描画原点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutResult {
    pub font_size: u32,
    /// 行ボックス左上の描画座標（負になることもある）
    pub origin: (i32, i32),
    pub bounds: TextBounds,
}

/// `text` の外接矩形が幅・高さともキャンバスの `ratio` 倍に収まる最大サイズを返す。
///
/// 探索範囲は `[MIN_FONT_SIZE, min(width, height)]`。
/// 計測に失敗したサイズは収まらないものとして扱い、エラーは外に出さない。
/// どのサイズも収まらなければ `MIN_FONT_SIZE` を返す。
pub fn compute_optimal_size<M: TextMeasurer + ?Sized>(
    text: &str,
    canvas: (u32, u32),
    measurer: &M,
    ratio: f64,
) -> u32 {
    let (width, height) = canvas;
    let target_w = width as f64 * ratio;
    let target_h = height as f64 * ratio;

    let mut lo = MIN_FONT_SIZE;
    let mut hi = width.min(height);
    let mut best = MIN_FONT_SIZE;
    let mut probes = 0u32;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        probes += 1;
        let fits = match measurer.measure(text, mid) {
            Ok(b) => b.width() as f64 <= target_w && b.height() as f64 <= target_h,
            Err(e) => {
                log::debug!(target: "AutoFit", "probe {mid}px failed, treating as too large: {e}");
                false
            }
        };

        // mid >= MIN_FONT_SIZE なので hi が負になることはない
        if fits {
            best = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    log::debug!(
        target: "AutoFit",
        "text={text:?} canvas={width}x{height} ratio={ratio} -> {best}px ({probes} probes)"
    );
    best
}

/// 外接矩形をキャンバス中央に置くための描画原点を返す。
///
/// 縦方向は `(height - top - bottom) / 2` で、行ボックスではなくインクそのものを中央に寄せる。
/// 割り算は床関数。
pub fn compute_origin(canvas: (u32, u32), bounds: &TextBounds) -> (i32, i32) {
    let (width, height) = (canvas.0 as i32, canvas.1 as i32);
    let x = (width - bounds.width()).div_euclid(2);
    let y = (height - bounds.top - bounds.bottom).div_euclid(2);
    (x, y)
}

/// 自動サイズ決定と中央寄せをまとめて行う
pub fn layout<M: TextMeasurer + ?Sized>(
    text: &str,
    canvas: (u32, u32),
    measurer: &M,
    ratio: f64,
) -> Result<LayoutResult, GenError> {
    let font_size = compute_optimal_size(text, canvas, measurer, ratio);
    layout_at_size(text, canvas, measurer, font_size)
}

/// サイズ固定で中央寄せだけ行う
pub fn layout_at_size<M: TextMeasurer + ?Sized>(
    text: &str,
    canvas: (u32, u32),
    measurer: &M,
    font_size: u32,
) -> Result<LayoutResult, GenError> {
    let bounds = measurer
        .measure(text, font_size)
        .map_err(|e| GenError::FontLoad(format!("cannot use font at {font_size}px: {e}")))?;
    Ok(LayoutResult {
        font_size,
        origin: compute_origin(canvas, &bounds),
        bounds,
    })
}
