// Translation catalogs
//
// A catalog is a flat key -> string map for one locale, layered from the
// `theme/language/preload[_ll[_RR]].properties` files found in the catalog
// roots over a built-in English catalog. Loading is stateless: every call
// returns a fresh catalog and the caller decides which one is current.

pub mod discovery;
pub mod locale;
pub mod properties;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use unic_langid::LanguageIdentifier;

use crate::error::TranslationError;
use crate::paths;

/// Folder holding the translation files, relative to a catalog root.
pub const LANGUAGE_ROOT: &str = "theme/language";
pub const CATALOG_PREFIX: &str = "preload";
pub const CATALOG_SUFFIX: &str = ".properties";

const BUILTIN_CATALOG: &str = include_str!("../../resources/preload.properties");

/// Translation keys read by the preloader.
pub mod keys {
    pub const FATAL_ERROR: &str = "fatalError";
    pub const OK: &str = "ok";
    pub const CANCEL: &str = "cancel";
    pub const CLOSE: &str = "close";
    pub const WELCOME: &str = "welcome";
    pub const CONFIGURATION: &str = "configuration";
    pub const CONFIGURATION_TEXT: &str = "configuration.text";
    pub const CONFIGURING: &str = "configuring...";
    pub const LOADING: &str = "loading...";
    pub const BROWSE: &str = "browse...";
    pub const MAME_PROMPT: &str = "mame.prompt";
    pub const EXTRAS_PROMPT: &str = "extras.prompt";
    pub const MULTIMEDIA_PROMPT: &str = "multimedia.prompt";
    pub const LANGUAGE: &str = "language";
    pub const ALL_FILES: &str = "allFiles";
    pub const GTK_VERSION_ERROR: &str = "gtkVersion.error";
    pub const ADWAITA_VERSION_ERROR: &str = "adwaitaVersion.error";
    pub const PROCESSING_INPUT: &str = "processingMameInput...";
    pub const FORMATTING_DATA: &str = "formattingData...";
}

#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    locale: LanguageIdentifier,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// The built-in catalog alone.
    pub fn builtin() -> Self {
        Self {
            locale: locale::builtin(),
            entries: properties::parse(BUILTIN_CATALOG),
        }
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    pub fn get(&self, key: &str) -> Result<&str, TranslationError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TranslationError::MissingKey {
                key: key.to_string(),
                locale: self.locale.to_string(),
            })
    }

    /// Like [`Catalog::get`], falling back to the key itself after logging.
    /// For labels where showing something beats failing.
    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            Ok(text) => text.to_string(),
            Err(e) => {
                tracing::warn!("{e}");
                key.to_string()
            }
        }
    }

    /// Java-style `%s`/`%d` substitution of a single argument.
    pub fn format(&self, key: &str, arg: &str) -> Result<String, TranslationError> {
        let template = self.get(key)?;
        let mut out = template.replacen("%s", arg, 1);
        if out == template {
            out = template.replacen("%d", arg, 1);
        }
        Ok(out)
    }

    fn overlay(&mut self, entries: HashMap<String, String>) {
        self.entries.extend(entries);
    }
}

/// Loads catalogs from a fixed list of roots.
#[derive(Clone, Debug)]
pub struct CatalogLoader {
    roots: Vec<PathBuf>,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(paths::catalog_roots())
    }
}

impl CatalogLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Catalog for `locale`. Layers that are missing are skipped; layers that
    /// exist but cannot be read are logged and skipped.
    pub fn load(&self, locale: &LanguageIdentifier) -> Catalog {
        let mut catalog = Catalog::builtin();
        catalog.locale = locale.clone();

        for name in bundle_names(locale) {
            let Some(path) = self.find(&name) else {
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(source) => catalog.overlay(properties::parse(&source)),
                Err(e) => tracing::warn!("couldn't read catalog {}: {e}", path.display()),
            }
        }
        catalog
    }

    /// Translation folder the language list is built from: the first root
    /// that has one, so every listed locale is one `load` finds.
    pub fn language_root(&self) -> PathBuf {
        self.roots
            .iter()
            .map(|root| root.join(LANGUAGE_ROOT))
            .find(|path| path.is_dir())
            .unwrap_or_else(|| PathBuf::from(LANGUAGE_ROOT))
    }

    fn find(&self, file_name: &str) -> Option<PathBuf> {
        let relative = Path::new(LANGUAGE_ROOT).join(file_name);
        self.roots
            .iter()
            .map(|root| root.join(&relative))
            .find(|path| path.exists())
    }
}

/// File names from least to most specific: `preload.properties`,
/// `preload_fr.properties`, `preload_fr_FR.properties`.
fn bundle_names(locale: &LanguageIdentifier) -> Vec<String> {
    let mut names = vec![format!("{CATALOG_PREFIX}{CATALOG_SUFFIX}")];
    let language = locale.language.as_str();
    if language == "und" {
        return names;
    }

    let mut stem = format!("{CATALOG_PREFIX}_{language}");
    names.push(format!("{stem}{CATALOG_SUFFIX}"));
    if let Some(region) = locale.region {
        stem = format!("{stem}_{}", region.as_str());
        names.push(format!("{stem}{CATALOG_SUFFIX}"));
    }
    for variant in locale.variants() {
        stem = format!("{stem}_{}", variant.as_str());
        names.push(format!("{stem}{CATALOG_SUFFIX}"));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED_KEYS: [&str; 21] = [
        keys::FATAL_ERROR,
        keys::OK,
        keys::CANCEL,
        keys::CLOSE,
        keys::WELCOME,
        keys::CONFIGURATION,
        keys::CONFIGURATION_TEXT,
        keys::CONFIGURING,
        keys::LOADING,
        keys::BROWSE,
        keys::MAME_PROMPT,
        keys::EXTRAS_PROMPT,
        keys::MULTIMEDIA_PROMPT,
        keys::LANGUAGE,
        keys::ALL_FILES,
        keys::GTK_VERSION_ERROR,
        keys::ADWAITA_VERSION_ERROR,
        keys::PROCESSING_INPUT,
        keys::FORMATTING_DATA,
        "javaVersion.error",
        "maxMemory.error",
    ];

    fn write_catalog(root: &Path, name: &str, body: &str) {
        let dir = root.join(LANGUAGE_ROOT);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = Catalog::builtin();
        for key in REQUIRED_KEYS {
            assert!(catalog.get(key).is_ok(), "missing {key}");
        }
        assert!(catalog.get(keys::CONFIGURATION_TEXT).unwrap().contains("MAME"));
        assert!(catalog.get(keys::PROCESSING_INPUT).unwrap().contains("MAME"));
    }

    #[test]
    fn missing_key_is_an_error() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.get("nope"),
            Err(TranslationError::MissingKey {
                key: "nope".into(),
                locale: "en-GB".into(),
            })
        );
        assert_eq!(catalog.text("nope"), "nope");
    }

    #[test]
    fn specific_layers_override_general_ones() {
        let root = tempfile::tempdir().unwrap();
        write_catalog(root.path(), "preload_fr.properties", "ok=D'accord\ncancel=Annuler\n");
        write_catalog(root.path(), "preload_fr_FR.properties", "ok=OK\n");

        let loader = CatalogLoader::new(vec![root.path().to_path_buf()]);
        let catalog = loader.load(&locale::parse_tag("fr-FR"));
        assert_eq!(catalog.locale().to_string(), "fr-FR");
        assert_eq!(catalog.get(keys::OK).unwrap(), "OK");
        assert_eq!(catalog.get(keys::CANCEL).unwrap(), "Annuler");
        // Untranslated keys come from the built-in catalog.
        assert_eq!(
            catalog.get(keys::ALL_FILES).unwrap(),
            Catalog::builtin().get(keys::ALL_FILES).unwrap()
        );
    }

    #[test]
    fn first_root_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_catalog(first.path(), "preload_de.properties", "ok=Gut\n");
        write_catalog(second.path(), "preload_de.properties", "ok=Schlecht\n");

        let loader = CatalogLoader::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(loader.load(&locale::parse_tag("de")).get(keys::OK).unwrap(), "Gut");
    }

    #[test]
    fn listed_locales_load_their_catalogs() {
        let empty = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();
        write_catalog(library.path(), "preload_de_DE.properties", "ok=Gut\n");

        let loader = CatalogLoader::new(vec![
            empty.path().to_path_buf(),
            library.path().to_path_buf(),
        ]);
        let root = loader.language_root();
        assert_eq!(root, library.path().join(LANGUAGE_ROOT));

        let locales = discovery::available_locales(&root);
        assert_eq!(locales, vec![locale::builtin(), locale::parse_tag("de-DE")]);
        for listed in &locales[1..] {
            assert_eq!(loader.load(listed).get(keys::OK).unwrap(), "Gut");
        }
    }

    #[test]
    fn language_root_defaults_to_relative_folder() {
        let empty = tempfile::tempdir().unwrap();
        let loader = CatalogLoader::new(vec![empty.path().to_path_buf()]);
        assert_eq!(loader.language_root(), PathBuf::from(LANGUAGE_ROOT));
    }

    #[test]
    fn reading_is_utf8() {
        let root = tempfile::tempdir().unwrap();
        write_catalog(root.path(), "preload_fr_FR.properties", "browse...=Parcourir…\n");
        let loader = CatalogLoader::new(vec![root.path().to_path_buf()]);
        let catalog = loader.load(&locale::parse_tag("fr-FR"));
        assert_eq!(catalog.get(keys::BROWSE).unwrap(), "Parcourir…");
    }

    #[test]
    fn bundle_name_candidates() {
        assert_eq!(
            bundle_names(&locale::parse_tag("fr-FR")),
            ["preload.properties", "preload_fr.properties", "preload_fr_FR.properties"]
        );
        assert_eq!(bundle_names(&locale::parse_tag("")), ["preload.properties"]);
    }

    #[test]
    fn format_substitutes_argument() {
        let root = tempfile::tempdir().unwrap();
        write_catalog(root.path(), "preload.properties", "gtkVersion.error=Need 4.14, found %s\n");
        let loader = CatalogLoader::new(vec![root.path().to_path_buf()]);
        let catalog = loader.load(&locale::builtin());
        assert_eq!(
            catalog.format(keys::GTK_VERSION_ERROR, "4.6.0").unwrap(),
            "Need 4.14, found 4.6.0"
        );
    }
}
