use std::fmt;
use std::path::PathBuf;

use crate::engine::bridge::text::TextMeasureError;

/// 画像生成まわりのエラー
#[derive(Debug)]
pub enum GenError {
    /// 使えるフォントがどこにも見つからない
    NotFound,
    /// 色指定を解釈できない
    InvalidColor(String),
    /// フォントファイルはあるが読み込めない / 指定サイズで使えない
    FontLoad(String),
    /// 特定サイズでの計測・描画失敗
    Render(TextMeasureError),
    /// 出力先への書き込み失敗
    Io { path: PathBuf, source: std::io::Error },
    /// 設定値が範囲外
    InvalidConfig(String),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GenError::*;
        match self {
            NotFound => write!(
                f,
                "could not find any usable font, please specify one with --font-path"
            ),
            InvalidColor(s) => write!(f, "unrecognized color: {s}"),
            FontLoad(s) => write!(f, "font error: {s}"),
            Render(e) => write!(f, "render error: {e}"),
            Io { path, source } => write!(f, "{}: {source}", path.display()),
            InvalidConfig(s) => write!(f, "invalid configuration: {s}"),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Render(e) => Some(e),
            GenError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TextMeasureError> for GenError {
    fn from(e: TextMeasureError) -> Self {
        GenError::Render(e)
    }
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}
