//! macOS のシステムフォント取得

use std::path::PathBuf;

use crate::platform::font::FontDiscovery;

pub struct MacFontDiscovery;

impl FontDiscovery for MacFontDiscovery {
    /// macOS のシステムフォント候補を返す
    fn well_known_fonts(&self) -> Vec<PathBuf> {
        vec![
            PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
            PathBuf::from("/System/Library/Fonts/SFCompact-Bold.otf"),
            PathBuf::from("/Library/Fonts/Arial.ttf"),
            PathBuf::from("/Library/Fonts/Arial Bold.ttf"),
        ]
    }

    fn font_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![
            PathBuf::from("/Library/Fonts"),
            PathBuf::from("/System/Library/Fonts"),
        ];
        if let Some(home) = std::env::var_os("HOME") {
            roots.push(PathBuf::from(home).join("Library/Fonts"));
        }
        roots
    }
}
