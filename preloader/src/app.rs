// Preloader Application — adw::Application subclass
//
// On activation the app runs the preloader once. Run standalone there is no
// main application behind it, so the notifier reports readiness straight
// away and quits when the splash is gone.

use std::rc::Rc;

use anyhow::Context;
use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::ObjectSubclassIsExt;
use libadwaita as adw;

use crate::notification::{Notifier, Phase, PreloaderHandle};
use crate::preloader::Preloader;

mod imp {
    use super::*;
    use std::cell::Cell;
    use gtk4::subclass::prelude::*;
    use libadwaita::subclass::prelude::*;

    #[derive(Default)]
    pub struct PreloaderApp {
        pub started: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for PreloaderApp {
        const NAME: &'static str = "NegatronPreloaderApp";
        type Type = super::PreloaderApp;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for PreloaderApp {}

    impl ApplicationImpl for PreloaderApp {
        fn activate(&self) {
            let app = self.obj();
            app.on_activate();
        }
    }

    impl GtkApplicationImpl for PreloaderApp {}
    impl AdwApplicationImpl for PreloaderApp {}
}

glib::wrapper! {
    pub struct PreloaderApp(ObjectSubclass<imp::PreloaderApp>)
        @extends adw::Application, gtk4::Application, gio::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl PreloaderApp {
    const APP_ID: &'static str = "net.babelsoft.Negatron.Preloader";

    pub fn new() -> Self {
        glib::Object::builder()
            .property("application-id", Self::APP_ID)
            .build()
    }

    /// Called from `ApplicationImpl::activate`.
    fn on_activate(&self) {
        if let Some(existing) = self.active_window() {
            existing.present();
            return;
        }
        if self.imp().started.replace(true) {
            return;
        }

        // The app has no window until the splash exists.
        let hold = self.hold();
        let app = self.clone();
        glib::MainContext::default().spawn_local(async move {
            let notifier = Rc::new(StandaloneNotifier::new(&app));
            let started = Preloader::default()
                .start(app.upcast_ref(), notifier)
                .await
                .context("preloader startup failed");
            if let Err(e) = started {
                tracing::error!("{e:#}");
                app.quit();
            }
            drop(hold);
        });
    }
}

impl Default for PreloaderApp {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// StandaloneNotifier
// ---------------------------------------------------------------------------

/// Stands in for the main application when the preloader runs on its own.
pub struct StandaloneNotifier {
    app: glib::WeakRef<PreloaderApp>,
}

impl StandaloneNotifier {
    pub fn new(app: &PreloaderApp) -> Self {
        Self {
            app: app.downgrade(),
        }
    }

    fn quit(&self) {
        if let Some(app) = self.app.upgrade() {
            app.quit();
        }
    }
}

impl Notifier for StandaloneNotifier {
    fn on_configuration_succeeded(&self, handle: PreloaderHandle) {
        tracing::info!("configuration done");
        handle.state_change(Phase::BeforeStart);
    }

    fn on_preloading_succeeded(&self) {
        self.quit();
    }

    fn on_preloading_failed(&self) {
        self.quit();
    }
}
