// Negatron Preloader
//
// Startup front for the Negatron emulator launcher: prerequisite check,
// first-run configuration prompt and splash screen. A main application
// drives the splash through the PreloaderHandle it receives in
// `Notifier::on_configuration_succeeded`.

pub mod alert;
pub mod app;
pub mod config;
pub mod error;
pub mod flavor;
pub mod i18n;
pub mod locator;
pub mod notification;
pub mod paths;
pub mod preloader;
pub mod prerequisites;
pub mod prompt;
pub mod skin;
pub mod splash;

pub use app::PreloaderApp;
pub use config::{ConfigFile, Configuration};
pub use error::{PreloadError, TranslationError};
pub use flavor::Flavor;
pub use notification::{Notification, Notifier, Phase, PreloaderHandle};
pub use preloader::Preloader;
