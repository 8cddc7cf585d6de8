//! Text measurement abstraction for the auto-fit layout engine.
//!
//! # Overview
//!
//! This module defines the interface between the layout engine and
//! font-backed measurement / painting implementations.
//!
//! It does **not** rasterize glyphs by itself.
//! The platform renderer (`platform::renderer::text_measurer`) provides
//! the real implementation on top of a loaded font file, and
//! [`FallbackTextMeasurer`] provides a font-free heuristic one.
//!
//! # Responsibilities
//!
//! - Report the ink bounding box of a single line of text at a pixel size
//! - Paint that line onto an RGBA canvas at a given origin
//!
//! # Data Flow
//!
//! ```text
//! text + size → TextMeasurer → TextBounds → layout → TextPainter
//! ```

use std::fmt;

use image::RgbaImage;

use crate::engine::color::ColorValue;

/* ============================
 * Measure Result
 * ============================ */

/// Bounding box of rendered text, relative to the draw origin.
///
/// The origin is the top-left corner of the line box (the ascender line),
/// so `top` is the vertical bearing of the ink, not zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/* ============================
 * Errors
 * ============================ */

#[derive(Debug, Clone, PartialEq)]
pub enum TextMeasureError {
    /// フォントが指定サイズを扱えない
    UnsupportedSize(u32),
    /// フォントデータに必要なテーブルが無い
    MalformedFont(String),
    Internal(String),
}

impl fmt::Display for TextMeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSize(s) => write!(f, "Unsupported font size: {s}px"),
            Self::MalformedFont(s) => write!(f, "Malformed font: {s}"),
            Self::Internal(s) => write!(f, "Internal error: {s}"),
        }
    }
}

impl std::error::Error for TextMeasureError {}

/* ============================
 * Traits
 * ============================ */

/// Measures a single line of text.
///
/// Implementations must be monotone: for the same text, a larger `size`
/// never yields a narrower or shorter box. The size search in
/// [`crate::engine::layout`] relies on this and does not re-check it.
pub trait TextMeasurer {
    fn measure(&self, text: &str, size: u32) -> Result<TextBounds, TextMeasureError>;
}

/// A measurer that can also paint what it measures.
pub trait TextPainter: TextMeasurer {
    /// `origin` は `measure` と同じ座標系の原点（行ボックス左上）
    fn paint(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size: u32,
        origin: (i32, i32),
        color: ColorValue,
    ) -> Result<(), TextMeasureError>;
}

/* ============================
 * Fallback
 * ============================ */

pub mod fallback;
pub use fallback::FallbackTextMeasurer;
