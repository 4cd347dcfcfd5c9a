// Resource lookup across candidate root folders
//
// Packaged resources (translations, images, skins) may sit next to the
// working directory, inside a packaged install's `lib/app` folder, or in any
// folder of the platform library path.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable playing the role of the library search path.
#[cfg(windows)]
pub const LIBRARY_PATH_VAR: &str = "PATH";
#[cfg(target_os = "macos")]
pub const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(not(any(windows, target_os = "macos")))]
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    File,
    Folder,
}

impl PathKind {
    fn matches(self, path: &Path) -> bool {
        match self {
            Self::File => path.is_file(),
            Self::Folder => path.is_dir(),
        }
    }
}

/// Root folders for general resources, in search order. The library path is
/// split with the platform separator.
pub fn resource_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::new()];
    if let Some(app) = packaged_app_dir() {
        roots.push(app);
    }
    if let Some(value) = env::var_os(LIBRARY_PATH_VAR) {
        roots.extend(env::split_paths(&value));
    }
    roots
}

/// Root folders for translation catalogs, in search order.
///
/// Unlike [`resource_roots`], the library path is always split on `;`, even
/// where the platform separator is `:`. Existing installs rely on this.
pub fn catalog_roots() -> Vec<PathBuf> {
    let value = env::var_os(LIBRARY_PATH_VAR).unwrap_or_default();
    catalog_roots_from(&value)
}

fn catalog_roots_from(library_path: &OsString) -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::new()];
    let value = library_path.to_string_lossy();
    if !value.is_empty() {
        roots.extend(value.split(';').map(PathBuf::from));
    }
    roots
}

/// First existing `root/components...` of the requested kind.
pub fn locate(kind: PathKind, components: &[&str]) -> Option<PathBuf> {
    locate_in(&resource_roots(), kind, components)
}

pub fn locate_in(roots: &[PathBuf], kind: PathKind, components: &[&str]) -> Option<PathBuf> {
    roots
        .iter()
        .map(|root| components.iter().fold(root.clone(), |path, c| path.join(c)))
        .find(|path| kind.matches(path))
}

/// `<exe dir>/../lib/app` for packaged Linux installs.
fn packaged_app_dir() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let dir = exe.parent()?;
    let app = dir.parent()?.join("lib").join("app");
    app.is_dir().then_some(app)
}

/// Folder to open a picker in: the parent of `text` when it has one,
/// otherwise the working directory.
pub fn parent_or_cwd(text: &str) -> PathBuf {
    Path::new(text.trim())
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn locate_picks_first_matching_root() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::create_dir_all(second.path().join("theme/skin")).unwrap();
        fs::write(second.path().join("theme/logo.png"), b"png").unwrap();

        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            locate_in(&roots, PathKind::File, &["theme", "logo.png"]),
            Some(second.path().join("theme").join("logo.png"))
        );
        assert_eq!(
            locate_in(&roots, PathKind::Folder, &["theme", "skin"]),
            Some(second.path().join("theme").join("skin"))
        );
    }

    #[test]
    fn locate_respects_kind() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("theme")).unwrap();
        let roots = vec![root.path().to_path_buf()];
        assert_eq!(locate_in(&roots, PathKind::File, &["theme"]), None);
    }

    #[test]
    fn catalog_roots_split_on_semicolon() {
        let roots = catalog_roots_from(&OsString::from("/usr/lib:/opt/lib;/srv"));
        assert_eq!(
            roots,
            vec![
                PathBuf::new(),
                PathBuf::from("/usr/lib:/opt/lib"),
                PathBuf::from("/srv"),
            ]
        );
        assert_eq!(catalog_roots_from(&OsString::new()), vec![PathBuf::new()]);
    }

    #[test]
    fn picker_folder_falls_back_to_cwd() {
        assert_eq!(parent_or_cwd("  /opt/games/mame0260 "), PathBuf::from("/opt/games"));
        assert_eq!(parent_or_cwd("mame"), PathBuf::from("."));
        assert_eq!(parent_or_cwd(""), PathBuf::from("."));
    }
}
