// Preloader — startup sequence ahead of the main window
//
// Adopts the configured language, checks runtime prerequisites, shows the
// splash, runs the first-run prompt when no INI exists and then relays the
// main application's notifications onto the splash until it is dismissed.

use std::future::Future;
use std::rc::Rc;

use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use tokio::sync::mpsc;

use crate::alert;
use crate::config::{self, ConfigFile, Configuration};
use crate::error::PreloadError;
use crate::flavor::{Flavor, Platform};
use crate::i18n::{discovery, keys, locale, Catalog, CatalogLoader};
use crate::locator;
use crate::notification::{self, Notification, Notifier, PreloaderHandle};
use crate::prerequisites;
use crate::prompt::{PromptDialog, PromptForm};
use crate::skin;
use crate::splash::SplashWindow;

#[derive(Clone, Debug, Default)]
pub struct Preloader {
    config: ConfigFile,
    loader: CatalogLoader,
}

impl Preloader {
    pub fn new(config: ConfigFile, loader: CatalogLoader) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Run the startup sequence. Only an unmet prerequisite is returned as
    /// an error; it has already been shown to the user.
    pub async fn start(
        &self,
        app: &adw::Application,
        notifier: Rc<dyn Notifier>,
    ) -> Result<(), PreloadError> {
        self.adopt_configured_language();
        let catalog = self.loader.load(&locale::current());

        if let Err(e) = prerequisites::check(&catalog) {
            if let PreloadError::PrerequisiteUnmet(ref message) = e {
                alert::show_fatal(None, &catalog, message).await;
            }
            return Err(e);
        }

        let splash = SplashWindow::new(app, &catalog);
        skin::apply(&self.config);
        splash.present();

        let (splash_ref, catalog_ref) = (&splash, &catalog);
        let configured = self
            .first_run(move || async move {
                splash_ref.set_status(&catalog_ref.text(keys::CONFIGURING));
                self.ask_user(splash_ref).await
            })
            .await?;
        let flavor = match configured {
            Some(configuration) => configuration.flavor(),
            None => self.configured_flavor(),
        };

        let catalog = self.loader.load(&locale::current());
        splash.set_status(&catalog.text(keys::LOADING));

        let (handle, rx) = PreloaderHandle::channel();
        glib::MainContext::default().spawn_local(listen(
            rx,
            splash,
            catalog,
            flavor,
            Rc::clone(&notifier),
        ));
        notifier.on_configuration_succeeded(handle);
        Ok(())
    }

    fn adopt_configured_language(&self) {
        match self.config.value(config::keys::LANGUAGE) {
            Ok(Some(tag)) if !tag.is_empty() => locale::set_current(locale::parse_tag(&tag)),
            Ok(_) => {}
            Err(e) => tracing::warn!("{e}"),
        }
    }

    fn configured_flavor(&self) -> Flavor {
        self.config.flavor().unwrap_or_else(|e| {
            tracing::warn!("{e}");
            Flavor::default()
        })
    }

    /// When the INI is missing, ask `prompt` for a configuration and save
    /// it. A cancelled prompt writes nothing and a failed write is logged;
    /// startup goes on in both cases.
    pub async fn first_run<F, Fut>(&self, prompt: F) -> Result<Option<Configuration>, PreloadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<Configuration>, PreloadError>>,
    {
        if self.config.exists() {
            return Ok(None);
        }
        tracing::info!("{} not found, asking for a configuration", self.config.path().display());

        let Some(configuration) = prompt().await? else {
            tracing::info!("first-run configuration cancelled");
            return Ok(None);
        };
        self.persist(&configuration);
        Ok(Some(configuration))
    }

    async fn ask_user(&self, splash: &SplashWindow) -> Result<Option<Configuration>, PreloadError> {
        let locales = discovery::available_locales(&self.loader.language_root());
        let detected = match locator::detect_installed(Platform::current(), Flavor::Mame) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("{e}");
                None
            }
        };

        let form = PromptForm::new(self.loader.clone(), locales, &locale::current(), detected)?;
        Ok(PromptDialog::new(splash, form).prompt().await)
    }

    fn persist(&self, configuration: &Configuration) {
        if let Err(e) = self.config.save(configuration) {
            tracing::error!("{e}");
        }
    }
}

async fn listen(
    mut rx: mpsc::UnboundedReceiver<Notification>,
    splash: SplashWindow,
    catalog: Catalog,
    flavor: Flavor,
    notifier: Rc<dyn Notifier>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            Notification::Progress(value) => {
                let display = notification::progress_display(value, flavor, &catalog);
                match display.fraction {
                    Some(fraction) => splash.set_fraction(fraction),
                    None => splash.start_pulse(),
                }
                splash.set_status(&display.status);
            }
            Notification::StateChange(phase) => {
                tracing::debug!("main application reached {phase:?}");
                splash.dismiss();
                notifier.on_preloading_succeeded();
                break;
            }
            Notification::Error {
                location,
                cause,
                details,
            } => {
                let message = notification::error_message(&location, &cause, &details);
                tracing::error!("{message}");
                alert::show_fatal(Some(splash.upcast_ref()), &catalog, &message).await;
                splash.dismiss();
                splash.close();
                notifier.on_preloading_failed();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use std::path::PathBuf;

    fn preloader_at(ini: PathBuf) -> Preloader {
        Preloader::new(ConfigFile::new(ini), CatalogLoader::new(Vec::new()))
    }

    fn answer() -> Configuration {
        Configuration::new(Flavor::Mame, "/usr/bin/mame", "", "", "en-GB")
    }

    #[tokio::test]
    async fn existing_ini_is_not_prompted_for() {
        let dir = tempfile::tempdir().unwrap();
        let ini = dir.path().join("Negatron.ini");
        fs::write(&ini, "mame                      /usr/bin/mame\n").unwrap();
        let preloader = preloader_at(ini.clone());

        let asked = Cell::new(false);
        let asked_ref = &asked;
        let configured = preloader
            .first_run(move || async move {
                asked_ref.set(true);
                Ok(Some(answer()))
            })
            .await
            .unwrap();

        assert_eq!(configured, None);
        assert!(!asked.get());
        assert_eq!(fs::read_to_string(&ini).unwrap(), "mame                      /usr/bin/mame\n");
    }

    #[tokio::test]
    async fn confirmed_prompt_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let ini = dir.path().join("Negatron.ini");
        let preloader = preloader_at(ini.clone());

        let configured = preloader
            .first_run(|| async { Ok(Some(answer())) })
            .await
            .unwrap();

        assert_eq!(configured, Some(answer()));
        let written = fs::read_to_string(&ini).unwrap();
        assert!(written.starts_with("mame                      /usr/bin/mame"));
    }

    #[tokio::test]
    async fn cancelled_prompt_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ini = dir.path().join("Negatron.ini");
        let preloader = preloader_at(ini.clone());

        let configured = preloader.first_run(|| async { Ok(None) }).await.unwrap();

        assert_eq!(configured, None);
        assert!(!ini.exists());
    }

    #[tokio::test]
    async fn write_failure_does_not_stop_startup() {
        let dir = tempfile::tempdir().unwrap();
        let ini = dir.path().join("missing").join("Negatron.ini");
        let preloader = preloader_at(ini.clone());

        let configured = preloader
            .first_run(|| async { Ok(Some(answer())) })
            .await
            .unwrap();

        assert_eq!(configured, Some(answer()));
        assert!(!ini.exists());
    }
}
