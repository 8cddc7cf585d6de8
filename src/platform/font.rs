//! システムフォント取得の Facade

use std::path::PathBuf;

use crate::error::GenError;
use crate::platform::io::FontFileWalk;
use crate::platform::os::{linux, macos, windows};

/// プラットフォームごとのフォント探索戦略
pub trait FontDiscovery {
    /// 優先して確認するフォントファイル（順序付き）
    fn well_known_fonts(&self) -> Vec<PathBuf>;
    /// 見つからなかったときに再帰的に探すディレクトリ（順序付き）
    fn font_roots(&self) -> Vec<PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCategory {
    Windows,
    Mac,
    Unix,
}

impl PlatformCategory {
    /// 実行中の OS の分類
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            PlatformCategory::Windows
        } else if cfg!(target_os = "macos") {
            PlatformCategory::Mac
        } else {
            PlatformCategory::Unix
        }
    }

    pub fn discovery(self) -> Box<dyn FontDiscovery> {
        match self {
            PlatformCategory::Windows => Box::new(windows::font::WindowsFontDiscovery),
            PlatformCategory::Mac => Box::new(macos::font::MacFontDiscovery),
            PlatformCategory::Unix => Box::new(linux::font::UnixFontDiscovery),
        }
    }
}

/// 実行中の OS で使えるフォントを探す
pub fn resolve_font() -> Result<PathBuf, GenError> {
    let category = PlatformCategory::current();
    log::debug!(target: "FontResolver", "platform category: {category:?}");
    resolve_font_with(category.discovery().as_ref())
}

/// `discovery` の候補から最初に存在するフォントを返す。
///
/// 既知のパスを順に確認し、無ければフォントディレクトリを再帰的に走査して
/// 最初に見つかった `.ttf` / `.otf` を返す。
pub fn resolve_font_with(discovery: &dyn FontDiscovery) -> Result<PathBuf, GenError> {
    if let Some(path) = discovery.well_known_fonts().into_iter().find(|p| p.exists()) {
        log::info!(target: "FontResolver", "using font {}", path.display());
        return Ok(path);
    }

    match FontFileWalk::new(discovery.font_roots()).next() {
        Some(path) => {
            log::info!(target: "FontResolver", "using font {} (directory scan)", path.display());
            Ok(path)
        }
        None => Err(GenError::NotFound),
    }
}
