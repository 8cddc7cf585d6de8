//! Linux / その他 Unix 系のシステムフォント取得
//!
//! ディストリ差が大きいため、
//! ある確率が高そうなものを列挙する

use std::path::PathBuf;

use crate::platform::font::FontDiscovery;

pub struct UnixFontDiscovery;

impl FontDiscovery for UnixFontDiscovery {
    fn well_known_fonts(&self) -> Vec<PathBuf> {
        vec![
            // DejaVu
            PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
            // Liberation
            PathBuf::from("/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"),
            // Ubuntu
            PathBuf::from("/usr/share/fonts/truetype/ubuntu/Ubuntu-Bold.ttf"),
            // Arch 系
            PathBuf::from("/usr/share/fonts/TTF/Arial.ttf"),
        ]
    }

    fn font_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![
            PathBuf::from("/usr/share/fonts"),
            PathBuf::from("/usr/local/share/fonts"),
        ];
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            roots.push(home.join(".fonts"));
            roots.push(home.join(".local/share/fonts"));
        }
        roots
    }
}
