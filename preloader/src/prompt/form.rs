// PromptForm — state behind the first-run dialog
//
// Owns the three path fields, the flavor, the language choice and every
// string the dialog shows. Widgets send it messages; after each message the
// dialog re-reads a PromptView snapshot and copies the differences back.

use std::path::PathBuf;

use unic_langid::LanguageIdentifier;

use crate::config::Configuration;
use crate::error::TranslationError;
use crate::flavor::{FileFilterSpec, Flavor, Platform};
use crate::i18n::{keys, locale, Catalog, CatalogLoader};
use crate::paths;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Binary,
    Extras,
    Multimedia,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PromptMessage {
    /// The user edited a text field.
    TextChanged(Field, String),
    /// A binary was picked in the file chooser.
    BinaryChosen(PathBuf),
    /// A folder was picked for the extras or multimedia row.
    FolderChosen(Field, PathBuf),
    /// Index into the discovered locales.
    LocaleSelected(usize),
}

/// Localized strings of the dialog and of the splash window behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTexts {
    pub window_title: String,
    pub status: String,
    pub dialog_title: String,
    pub header: String,
    pub binary_prompt: String,
    pub extras_prompt: String,
    pub multimedia_prompt: String,
    pub browse: String,
    pub language_label: String,
    pub ok: String,
    pub cancel: String,
}

impl PromptTexts {
    fn from_catalog(catalog: &Catalog) -> Result<Self, TranslationError> {
        Ok(Self {
            window_title: catalog.get(keys::WELCOME)?.to_string(),
            status: catalog.get(keys::CONFIGURING)?.to_string(),
            dialog_title: catalog.get(keys::CONFIGURATION)?.to_string(),
            header: catalog.get(keys::CONFIGURATION_TEXT)?.to_string(),
            binary_prompt: catalog.get(keys::MAME_PROMPT)?.to_string(),
            extras_prompt: catalog.get(keys::EXTRAS_PROMPT)?.to_string(),
            multimedia_prompt: catalog.get(keys::MULTIMEDIA_PROMPT)?.to_string(),
            browse: catalog.get(keys::BROWSE)?.to_string(),
            language_label: catalog.get(keys::LANGUAGE)?.to_string(),
            ok: catalog.get(keys::OK)?.to_string(),
            cancel: catalog.get(keys::CANCEL)?.to_string(),
        })
    }

    /// Swap the flavor token in the texts that mention the emulator.
    fn retoken(&mut self, flavor: Flavor) {
        self.header = flavor.retoken(&self.header);
        self.binary_prompt = flavor.retoken(&self.binary_prompt);
        self.extras_prompt = flavor.retoken(&self.extras_prompt);
    }
}

/// Everything the dialog displays, detached from the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptView {
    pub texts: PromptTexts,
    pub flavor: Flavor,
    pub binary_label: String,
    pub extras_label: String,
    pub multimedia_label: String,
    pub binary: String,
    pub extras: String,
    pub multimedia: String,
    pub binary_in_error: bool,
    pub confirm_enabled: bool,
    pub multimedia_visible: bool,
    pub selected_locale: usize,
}

/// A folder picker to open: its title and starting folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRequest {
    pub title: String,
    pub initial_folder: PathBuf,
}

#[derive(Debug)]
pub struct PromptForm {
    loader: CatalogLoader,
    catalog: Catalog,
    locales: Vec<LanguageIdentifier>,
    selected: usize,
    flavor: Flavor,
    binary: String,
    extras: String,
    multimedia: String,
    texts: PromptTexts,
}

impl PromptForm {
    /// `locales` starts with the built-in locale. The selection is the
    /// process default locale when listed, the built-in one otherwise;
    /// the catalog always follows the process default.
    pub fn new(
        loader: CatalogLoader,
        mut locales: Vec<LanguageIdentifier>,
        default_locale: &LanguageIdentifier,
        detected_binary: Option<String>,
    ) -> Result<Self, TranslationError> {
        if locales.is_empty() {
            locales.push(locale::builtin());
        }
        let selected = locales
            .iter()
            .position(|l| l == default_locale)
            .unwrap_or(0);
        let catalog = loader.load(default_locale);
        let texts = PromptTexts::from_catalog(&catalog)?;

        Ok(Self {
            loader,
            catalog,
            locales,
            selected,
            flavor: Flavor::default(),
            binary: detected_binary.unwrap_or_default(),
            extras: String::new(),
            multimedia: String::new(),
            texts,
        })
    }

    pub fn update(&mut self, message: PromptMessage) -> Result<(), TranslationError> {
        match message {
            PromptMessage::TextChanged(field, text) => *self.field_mut(field) = text,
            PromptMessage::BinaryChosen(path) => {
                self.switch_flavor(Flavor::from_binary(&path));
                self.binary = path.display().to_string();
            }
            PromptMessage::FolderChosen(field, path) => {
                *self.field_mut(field) = path.display().to_string();
            }
            PromptMessage::LocaleSelected(index) => self.select_locale(index)?,
        }
        Ok(())
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Binary => &mut self.binary,
            Field::Extras => &mut self.extras,
            Field::Multimedia => &mut self.multimedia,
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Binary => &self.binary,
            Field::Extras => &self.extras,
            Field::Multimedia => &self.multimedia,
        }
    }

    fn switch_flavor(&mut self, flavor: Flavor) {
        self.flavor = flavor;
        self.texts.retoken(flavor);
    }

    fn select_locale(&mut self, index: usize) -> Result<(), TranslationError> {
        if index == self.selected || index >= self.locales.len() {
            return Ok(());
        }
        let catalog = self.loader.load(&self.locales[index]);
        let mut texts = PromptTexts::from_catalog(&catalog)?;
        // Fresh catalog strings name MAME; keep the flavor on screen.
        texts.retoken(self.flavor);

        self.selected = index;
        self.catalog = catalog;
        self.texts = texts;
        Ok(())
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn texts(&self) -> &PromptTexts {
        &self.texts
    }

    pub fn locales(&self) -> &[LanguageIdentifier] {
        &self.locales
    }

    pub fn selected_locale(&self) -> &LanguageIdentifier {
        &self.locales[self.selected]
    }

    /// Display names for the language choice, in list order.
    pub fn locale_names(&self) -> Vec<String> {
        self.locales.iter().map(locale::endonym).collect()
    }

    pub fn confirm_enabled(&self) -> bool {
        !self.binary.trim().is_empty()
    }

    pub fn binary_in_error(&self) -> bool {
        !self.confirm_enabled()
    }

    pub fn multimedia_visible(&self) -> bool {
        self.flavor.uses_multimedia()
    }

    pub fn binary_filters(&self, platform: Platform) -> Vec<FileFilterSpec> {
        Flavor::binary_filters(platform, &self.catalog.text(keys::ALL_FILES))
    }

    /// The binary picker always opens in the working directory.
    pub fn binary_folder(&self) -> PathBuf {
        PathBuf::from(".")
    }

    pub fn extras_request(&self) -> FolderRequest {
        FolderRequest {
            title: self.flavor.extras_label(),
            initial_folder: paths::parent_or_cwd(&self.binary),
        }
    }

    pub fn multimedia_request(&self) -> FolderRequest {
        let base = if !self.extras.trim().is_empty() {
            &self.extras
        } else {
            &self.binary
        };
        FolderRequest {
            title: Flavor::Mame.multimedia_label(),
            initial_folder: paths::parent_or_cwd(base),
        }
    }

    pub fn view(&self) -> PromptView {
        PromptView {
            texts: self.texts.clone(),
            flavor: self.flavor,
            binary_label: self.flavor.token().to_string(),
            extras_label: self.flavor.extras_label(),
            multimedia_label: Flavor::Mame.multimedia_label(),
            binary: self.binary.clone(),
            extras: self.extras.clone(),
            multimedia: self.multimedia.clone(),
            binary_in_error: self.binary_in_error(),
            confirm_enabled: self.confirm_enabled(),
            multimedia_visible: self.multimedia_visible(),
            selected_locale: self.selected,
        }
    }

    /// The confirmed configuration, or `None` while the binary is blank.
    pub fn configuration(&self) -> Option<Configuration> {
        self.confirm_enabled().then(|| {
            Configuration::new(
                self.flavor,
                self.binary.clone(),
                self.extras.clone(),
                self.multimedia.clone(),
                self.selected_locale().to_string(),
            )
        })
    }
}
