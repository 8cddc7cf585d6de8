mod utils;

use std::path::PathBuf;

use dummy_img_gen::GenError;
use dummy_img_gen::platform::font::{FontDiscovery, resolve_font_with};
use dummy_img_gen::platform::io::FontFileWalk;
use utils::TestDir;

struct FixedDiscovery {
    well_known: Vec<PathBuf>,
    roots: Vec<PathBuf>,
}

impl FontDiscovery for FixedDiscovery {
    fn well_known_fonts(&self) -> Vec<PathBuf> {
        self.well_known.clone()
    }

    fn font_roots(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }
}

#[test]
fn first_existing_well_known_font_wins() {
    let dir = TestDir::new("well_known");
    let second = dir.touch("b/Second.ttf");
    let third = dir.touch("c/Third.ttf");

    let discovery = FixedDiscovery {
        well_known: vec![dir.join("a/Missing.ttf"), second.clone(), third],
        roots: vec![dir.path.clone()],
    };
    assert_eq!(resolve_font_with(&discovery).unwrap(), second);
}

#[test]
fn falls_back_to_recursive_scan() {
    let dir = TestDir::new("scan");
    dir.touch("fonts/readme.txt");
    dir.touch("fonts/Collection.ttc");
    let nested = dir.touch("fonts/deep/er/Nested.OTF");

    let discovery = FixedDiscovery {
        well_known: vec![dir.join("nope.ttf")],
        roots: vec![dir.join("missing_root"), dir.join("fonts")],
    };
    assert_eq!(resolve_font_with(&discovery).unwrap(), nested);
}

#[test]
fn roots_are_scanned_in_order() {
    let dir = TestDir::new("root_order");
    let first = dir.touch("one/A.ttf");
    dir.touch("two/B.ttf");

    let discovery = FixedDiscovery {
        well_known: vec![],
        roots: vec![dir.join("one"), dir.join("two")],
    };
    assert_eq!(resolve_font_with(&discovery).unwrap(), first);
}

#[test]
fn nothing_found_is_not_found() {
    let dir = TestDir::new("empty");
    dir.touch("fonts/not_a_font.txt");

    let discovery = FixedDiscovery {
        well_known: vec![dir.join("x.ttf")],
        roots: vec![dir.join("fonts")],
    };
    assert!(matches!(
        resolve_font_with(&discovery),
        Err(GenError::NotFound)
    ));
}

#[test]
fn walk_yields_files_before_descending() {
    let dir = TestDir::new("walk");
    let top = dir.touch("root/Top.ttf");
    let deep = dir.touch("root/sub/Deep.ttf");

    let found: Vec<_> = FontFileWalk::new(vec![dir.join("root")]).collect();
    assert_eq!(found, vec![top, deep]);
}

#[test]
fn walk_is_lazy_and_finite() {
    let dir = TestDir::new("walk_lazy");
    for i in 0..5 {
        dir.touch(&format!("root/d{i}/F{i}.ttf"));
    }

    let mut walk = FontFileWalk::new(vec![dir.join("root")]);
    let first = walk.next().expect("at least one font");
    assert!(first.starts_with(dir.join("root")));
    assert_eq!(walk.count(), 4);
}
