use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

/// フォントとして扱う拡張子（小文字）
const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// `.ttf` / `.otf` で終わるファイル名か（大文字小文字は区別しない）
pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| FONT_EXTENSIONS.contains(&e.as_str()))
}

/// フォントディレクトリを再帰的に辿り、フォントファイルを順に返す。
///
/// ルートは渡された順に処理し、各ディレクトリ直下のファイルを
/// サブディレクトリより先に返す。ディレクトリは必要になった時点で開くので、
/// 最初の一件で打ち切ればそれ以上は走査しない。
/// 読めないディレクトリは飛ばす。シンボリックリンクのディレクトリは辿らない。
pub struct FontFileWalk {
    roots: std::vec::IntoIter<PathBuf>,
    current: Option<ReadDir>,
    pending: Vec<PathBuf>,
}

impl FontFileWalk {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots: roots.into_iter(),
            current: None,
            pending: Vec::new(),
        }
    }

    fn open_next_dir(&mut self) -> bool {
        while let Some(dir) = self.pending.pop().or_else(|| self.roots.next()) {
            match fs::read_dir(&dir) {
                Ok(rd) => {
                    self.current = Some(rd);
                    return true;
                }
                Err(e) => {
                    log::debug!(target: "FontResolver", "skip {}: {e}", dir.display());
                }
            }
        }
        false
    }
}

impl Iterator for FontFileWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let Some(rd) = self.current.as_mut() else {
                if !self.open_next_dir() {
                    return None;
                }
                continue;
            };

            let entry = match rd.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    log::debug!(target: "FontResolver", "unreadable entry: {e}");
                    continue;
                }
                None => {
                    self.current = None;
                    continue;
                }
            };

            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                self.pending.push(path);
            } else if (file_type.is_file() || path.is_file()) && is_font_file(&path) {
                return Some(path);
            }
        }
    }
}
