// Locale discovery — scans the translation folder for `preload*.properties`

use std::fs;
use std::io;
use std::path::Path;

use unic_langid::LanguageIdentifier;

use crate::error::PreloadError;

use super::locale;
use super::{CATALOG_PREFIX, CATALOG_SUFFIX};

/// Locales offered by the language choice: the built-in one first, then
/// every tag found under `root`. A walk error is logged and the list keeps
/// what was gathered before it.
pub fn available_locales(root: &Path) -> Vec<LanguageIdentifier> {
    let mut locales = vec![locale::builtin()];
    if root.exists() {
        if let Err(source) = walk(root, &mut locales) {
            let e = PreloadError::LocaleWalkFailed {
                path: root.to_path_buf(),
                source,
            };
            tracing::debug!("{e}");
        }
    }
    locales
}

/// Depth-first walk over regular files, appending the locale of each
/// matching file name. Directory read errors abort the walk.
pub fn walk(dir: &Path, locales: &mut Vec<LanguageIdentifier>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    // Name order, not raw directory order.
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&entry.path(), locales)?;
        } else if file_type.is_file() {
            let name = entry.file_name();
            if let Some(tag) = locale_tag(&name.to_string_lossy()) {
                locales.push(locale::parse_tag(&tag));
            }
        }
    }
    Ok(())
}

/// `preload.*\.properties`, matched against the whole file name.
pub fn is_catalog_file(name: &str) -> bool {
    name.len() >= CATALOG_PREFIX.len() + CATALOG_SUFFIX.len()
        && name.starts_with(CATALOG_PREFIX)
        && name.ends_with(CATALOG_SUFFIX)
}

/// Text between the first `_` and the `.properties` suffix, with `_` turned
/// into `-`. The base catalog (no `_`) carries no tag. Under the name mask
/// the `_` always precedes the suffix, so the slice bounds cannot cross.
pub fn locale_tag(name: &str) -> Option<String> {
    if !is_catalog_file(name) {
        return None;
    }
    let start = name.find('_')? + 1;
    let end = name.len() - CATALOG_SUFFIX.len();
    name.get(start..end).map(|tag| tag.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_matches_whole_name() {
        assert!(is_catalog_file("preload.properties"));
        assert!(is_catalog_file("preload_fr_FR.properties"));
        assert!(!is_catalog_file("preload_fr_FR.properties.bak"));
        assert!(!is_catalog_file("language_fr.properties"));
        assert!(!is_catalog_file("preload.propertie"));
    }

    #[test]
    fn tag_extraction() {
        assert_eq!(locale_tag("preload_fr_FR.properties").as_deref(), Some("fr-FR"));
        assert_eq!(locale_tag("preload_de.properties").as_deref(), Some("de"));
        assert_eq!(locale_tag("preload_.properties").as_deref(), Some(""));
        assert_eq!(locale_tag("preload.properties"), None);
        assert_eq!(locale_tag("readme_fr.txt"), None);
    }

    #[test]
    fn builtin_locale_comes_first() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("preload_fr_FR.properties"), "ok=OK\n").unwrap();
        fs::write(root.path().join("preload.properties"), "ok=OK\n").unwrap();
        fs::write(root.path().join("notes.txt"), "").unwrap();
        fs::create_dir(root.path().join("extra")).unwrap();
        fs::write(root.path().join("extra/preload_de_DE.properties"), "").unwrap();

        let tags: Vec<String> = available_locales(root.path())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(tags, ["en-GB", "de-DE", "fr-FR"]);
    }

    #[test]
    fn missing_folder_offers_builtin_only() {
        let root = tempfile::tempdir().unwrap();
        let locales = available_locales(&root.path().join("theme/language"));
        assert_eq!(locales, vec![locale::builtin()]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subfolder_keeps_earlier_results() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("preload_fr_FR.properties"), "").unwrap();
        let locked = root.path().join("zz-locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("preload_it_IT.properties"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let tags: Vec<String> = available_locales(root.path())
            .iter()
            .map(ToString::to_string)
            .collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(tags.starts_with(&["en-GB".to_string(), "fr-FR".to_string()]));
    }
}
