//! Windows のシステムフォント取得

use std::path::PathBuf;

use crate::platform::font::FontDiscovery;

pub struct WindowsFontDiscovery;

impl WindowsFontDiscovery {
    fn fonts_dir() -> PathBuf {
        std::env::var_os("WINDIR")
            .map(|w| PathBuf::from(w).join("Fonts"))
            .unwrap_or_else(|| PathBuf::from(r"C:\Windows\Fonts"))
    }
}

impl FontDiscovery for WindowsFontDiscovery {
    /// システムフォント候補を返す
    fn well_known_fonts(&self) -> Vec<PathBuf> {
        let dir = Self::fonts_dir();
        ["Arial.ttf", "Arial Bold.ttf", "Calibri.ttf", "Segoe UI Bold.ttf"]
            .iter()
            .map(|name| dir.join(name))
            .collect()
    }

    fn font_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![Self::fonts_dir()];
        // ユーザー単位でインストールされたフォント
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            roots.push(PathBuf::from(local).join(r"Microsoft\Windows\Fonts"));
        }
        roots
    }
}
