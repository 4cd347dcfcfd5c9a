// Preloader error kinds
//
// One variant per failure the startup sequence can meet. Only
// PrerequisiteUnmet aborts startup; every other kind is logged by the caller
// and leaves the application in a state the next user action can recover from.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing the application for its first window.
#[derive(Debug, Error)]
pub enum PreloadError {
    /// The GTK or libadwaita runtime is older than required. Carries the
    /// localized message already shown to the user.
    #[error("prerequisite unmet: {0}")]
    PrerequisiteUnmet(String),

    /// The configuration file could not be written.
    #[error("couldn't write ini file {}: {source}", path.display())]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("couldn't read ini file {}: {source}", path.display())]
    ConfigReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A translation key is missing from every catalog layer.
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Walking the translation folder failed part-way.
    #[error("couldn't walk translation folder {}: {source}", path.display())]
    LocaleWalkFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The executable locator could not be run or read.
    #[error("couldn't probe for an installed emulator: {0}")]
    LocatorProbeFailed(#[source] io::Error),
}

/// Errors raised by catalog lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("can't find resource for key {key} in locale {locale}")]
    MissingKey { key: String, locale: String },
}
